use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::{self, Pos2, Rect};

use crate::geometry::LatLon;
use crate::model::Location;

/// Screen-space margin kept around fitted bounds.
pub const FIT_PADDING_PX: f32 = 40.0;

/// Default map center when nothing has been fitted yet (continental US).
const DEFAULT_CENTER: LatLon = LatLon {
    lat: 39.8,
    lon: -98.6,
};
const DEFAULT_PIXELS_PER_DEGREE: f64 = 14.0;
const MIN_PIXELS_PER_DEGREE: f64 = 1.0;
const MAX_PIXELS_PER_DEGREE: f64 = 20_000.0;
/// Span used for a single location, so the fit has some area.
const MIN_SPAN_DEGREES: f64 = 0.05;

/// Axis-aligned lat/lon bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Smallest box enclosing every location. `None` for an empty set.
    pub fn enclosing(locations: &[Location]) -> Option<Self> {
        let mut iter = locations.iter();
        let first = iter.next()?;
        let init = Self {
            min_lat: first.y,
            max_lat: first.y,
            min_lon: first.x,
            max_lon: first.x,
        };
        Some(iter.fold(init, |b, l| Self {
            min_lat: b.min_lat.min(l.y),
            max_lat: b.max_lat.max(l.y),
            min_lon: b.min_lon.min(l.x),
            max_lon: b.max_lon.max(l.x),
        }))
    }

    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    #[cfg(test)]
    pub fn contains(&self, p: LatLon) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat)
            && (self.min_lon..=self.max_lon).contains(&p.lon)
    }
}

/// A request to show `bounds` with `padding_px` of margin on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    pub bounds: Bounds,
    pub padding_px: f32,
}

/// Anything that can be asked to show a region.
pub trait MapSurface {
    fn fit_bounds(&mut self, request: FitRequest);
}

/// Issues a fit whenever the location set changes, including first load.
/// An empty set never triggers a fit.
#[derive(Debug, Default)]
pub struct ViewportFitter {
    last_fingerprint: Option<u64>,
}

impl ViewportFitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fit request issued, if any.
    pub fn update(
        &mut self,
        locations: &[Location],
        surface: &mut impl MapSurface,
    ) -> Option<FitRequest> {
        let bounds = Bounds::enclosing(locations)?;
        let fingerprint = fingerprint(locations);
        if self.last_fingerprint == Some(fingerprint) {
            return None;
        }
        self.last_fingerprint = Some(fingerprint);

        let request = FitRequest {
            bounds,
            padding_px: FIT_PADDING_PX,
        };
        surface.fit_bounds(request);
        Some(request)
    }
}

/// Content hash of ids and coordinates.
fn fingerprint(locations: &[Location]) -> u64 {
    let mut hasher = DefaultHasher::new();
    locations.len().hash(&mut hasher);
    for l in locations {
        l.id.hash(&mut hasher);
        l.x.to_bits().hash(&mut hasher);
        l.y.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Equirectangular camera over the map area.
///
/// Longitude is scaled by `cos(lat)` at the center chosen by the last fit, so
/// shapes are not stretched at mid latitudes.
#[derive(Debug, Clone)]
pub struct MapView {
    center: LatLon,
    pixels_per_degree: f64,
    lon_scale: f64,
    pending_fit: Option<FitRequest>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            pixels_per_degree: DEFAULT_PIXELS_PER_DEGREE,
            lon_scale: DEFAULT_CENTER.lat.to_radians().cos(),
            pending_fit: None,
        }
    }
}

impl MapSurface for MapView {
    fn fit_bounds(&mut self, request: FitRequest) {
        self.pending_fit = Some(request);
    }
}

impl MapView {
    #[cfg(test)]
    pub fn pixels_per_degree(&self) -> f64 {
        self.pixels_per_degree
    }

    #[cfg(test)]
    pub fn has_pending_fit(&self) -> bool {
        self.pending_fit.is_some()
    }

    /// Apply a pending fit now that the screen rect is known.
    pub fn prepare(&mut self, rect: Rect) {
        let Some(request) = self.pending_fit.take() else {
            return;
        };
        let bounds = request.bounds;
        self.center = bounds.center();
        self.lon_scale = self.center.lat.to_radians().cos().max(0.01);

        let avail_w = (rect.width() - 2.0 * request.padding_px).max(1.0) as f64;
        let avail_h = (rect.height() - 2.0 * request.padding_px).max(1.0) as f64;
        let lon_span = (bounds.lon_span() * self.lon_scale).max(MIN_SPAN_DEGREES);
        let lat_span = bounds.lat_span().max(MIN_SPAN_DEGREES);

        self.pixels_per_degree = (avail_w / lon_span)
            .min(avail_h / lat_span)
            .clamp(MIN_PIXELS_PER_DEGREE, MAX_PIXELS_PER_DEGREE);
    }

    pub fn project(&self, rect: Rect, p: LatLon) -> Pos2 {
        let c = rect.center();
        let dx = (p.lon - self.center.lon) * self.lon_scale * self.pixels_per_degree;
        let dy = (p.lat - self.center.lat) * self.pixels_per_degree;
        egui::pos2(c.x + dx as f32, c.y - dy as f32)
    }

    pub fn unproject(&self, rect: Rect, pos: Pos2) -> LatLon {
        let c = rect.center();
        let dx = (pos.x - c.x) as f64;
        let dy = (pos.y - c.y) as f64;
        LatLon::new(
            self.center.lat - dy / self.pixels_per_degree,
            self.center.lon + dx / (self.lon_scale * self.pixels_per_degree),
        )
    }

    /// Shift the map by a screen-space drag.
    pub fn pan(&mut self, delta: egui::Vec2) {
        self.center.lat += delta.y as f64 / self.pixels_per_degree;
        self.center.lon -= delta.x as f64 / (self.lon_scale * self.pixels_per_degree);
    }

    /// Zoom by `factor`, keeping the point under `anchor` fixed.
    pub fn zoom(&mut self, rect: Rect, anchor: Pos2, factor: f64) {
        let before = self.unproject(rect, anchor);
        self.pixels_per_degree = (self.pixels_per_degree * factor)
            .clamp(MIN_PIXELS_PER_DEGREE, MAX_PIXELS_PER_DEGREE);
        let after = self.unproject(rect, anchor);
        self.center.lat += before.lat - after.lat;
        self.center.lon += before.lon - after.lon;
    }
}
