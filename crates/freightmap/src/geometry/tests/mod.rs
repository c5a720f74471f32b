mod segments;

use super::types::{LatLon, Segment};
use crate::model::{Connection, Location, LocationId};

/// Helper to create a Location at `(lon, lat)`.
fn loc(id: &str, lon: f64, lat: f64) -> Location {
    Location {
        id: id.to_string(),
        x: lon,
        y: lat,
        fuel_price: None,
    }
}

/// Helper to create a Connection without geometry.
fn conn(from: &str, to: &str) -> Connection {
    Connection {
        from: from.to_string(),
        to: to.to_string(),
        distance: 1.0,
        geometry: None,
    }
}

/// Helper to create a Connection with `[lon, lat]` geometry.
fn conn_geo(from: &str, to: &str, geometry: &[[f64; 2]]) -> Connection {
    Connection {
        from: from.to_string(),
        to: to.to_string(),
        distance: 1.0,
        geometry: Some(geometry.to_vec()),
    }
}

/// Helper to build a path from string slices.
fn path(ids: &[&str]) -> Vec<LocationId> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Three locations on a diagonal: A(0,0), B(1,1), C(2,2).
fn diagonal() -> Vec<Location> {
    vec![loc("A", 0.0, 0.0), loc("B", 1.0, 1.0), loc("C", 2.0, 2.0)]
}

/// Positions of a segment as `[lat, lon]` arrays.
fn coords(segment: &Segment) -> Vec<[f64; 2]> {
    segment.positions.iter().map(|p| p.to_array()).collect()
}

/// `[lon, lat]` points converted to `[lat, lon]` arrays.
fn lat_lon(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    points
        .iter()
        .map(|&p| LatLon::from_lon_lat(p).to_array())
        .collect()
}
