use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

use crate::model::Location;

/// Hue for the cheapest fuel (green).
pub const CHEAP_HUE: f32 = 120.0;
/// Hue for the most expensive fuel (red).
pub const EXPENSIVE_HUE: f32 = 0.0;
/// Hue used when every price is effectively the same (blue).
pub const UNIFORM_HUE: f32 = 210.0;

const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.45;

/// Ranges narrower than this are treated as a single price.
const DEGENERATE_SPAN: f64 = 0.001;

/// Closed price range over the locations that carry a price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// `None` when no location has a price.
    pub fn from_locations(locations: &[Location]) -> Option<Self> {
        locations
            .iter()
            .filter_map(|l| l.fuel_price)
            .filter(|p| p.is_finite())
            .fold(None, |acc, p| match acc {
                None => Some(Self { min: p, max: p }),
                Some(r) => Some(Self {
                    min: r.min.min(p),
                    max: r.max.max(p),
                }),
            })
    }

    pub fn color_for(&self, price: f64) -> Color32 {
        color_for(price, self.min, self.max)
    }
}

/// Map a fuel price to a marker color.
///
/// A range narrower than a tenth of a cent gets one fixed color, and so does an
/// inverted range (`min > max`). Otherwise the hue runs linearly from green at
/// `min` to red at `max`, clamped.
pub fn color_for(price: f64, min: f64, max: f64) -> Color32 {
    let span = max - min;
    if span < DEGENERATE_SPAN {
        return hsl_color(UNIFORM_HUE);
    }
    let t = ((price - min) / span).clamp(0.0, 1.0) as f32;
    hsl_color(CHEAP_HUE + (EXPENSIVE_HUE - CHEAP_HUE) * t)
}

/// Fixed saturation/lightness HSL color at the given hue, in sRGB.
pub fn hsl_color(hue: f32) -> Color32 {
    let hsl: Hsl = Hsl::new(hue, SATURATION, LIGHTNESS);
    let rgb: Srgb = Srgb::from_color(hsl);
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}
