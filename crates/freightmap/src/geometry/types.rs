use std::cmp::Ordering;
use std::fmt;

use crate::model::LocationId;

/// A map position in `[lat, lon]` order, the order the map surface consumes.
///
/// The API sends geometry as `[lon, lat]`; convert with [`LatLon::from_lon_lat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert an API `[lon, lat]` point.
    pub fn from_lon_lat(point: [f64; 2]) -> Self {
        Self {
            lat: point[1],
            lon: point[0],
        }
    }

    /// `[lat, lon]` pair, as drawn.
    #[cfg(test)]
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// Direction-independent identifier for a connection.
///
/// `lo` is always the lexicographically lesser id, so `A→B` and `B→A` produce
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    pub lo: LocationId,
    pub hi: LocationId,
}

impl CanonicalKey {
    /// Create a canonical key. The lesser id goes first.
    pub fn new(a: &str, b: &str) -> Self {
        match a.cmp(b) {
            Ordering::Greater => Self {
                lo: b.to_string(),
                hi: a.to_string(),
            },
            _ => Self {
                lo: a.to_string(),
                hi: b.to_string(),
            },
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.lo, self.hi)
    }
}

/// Best-known drawable geometry for one connection, kept in declared direction.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEdge {
    pub declared_from: LocationId,
    pub declared_to: LocationId,
    pub positions: Vec<LatLon>,
    /// True when `positions` came from explicit geometry rather than a
    /// straight line between the endpoints.
    pub has_geometry: bool,
}

impl IndexedEdge {
    /// Whether traversing `from → to` follows the declared direction.
    pub fn runs(&self, from: &str, to: &str) -> bool {
        self.declared_from == from && self.declared_to == to
    }
}

/// One directed, drawable piece of a path between two consecutive locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Unique within one resolved path, even when a pair repeats.
    pub key: String,
    pub from: LocationId,
    pub to: LocationId,
    /// Positions in traversal order.
    pub positions: Vec<LatLon>,
    /// False when the segment is a straight-line fallback.
    pub from_index: bool,
}

impl Segment {
    pub fn key_for(pair_index: usize, from: &str, to: &str) -> String {
        format!("{pair_index}:{from}->{to}")
    }
}
