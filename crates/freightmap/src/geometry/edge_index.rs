use std::collections::HashMap;

use tracing::warn;

use super::types::{CanonicalKey, IndexedEdge, LatLon};
use crate::model::{Connection, Location};

/// Undirected lookup from a location pair to its drawable geometry.
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    edges: HashMap<CanonicalKey, IndexedEdge>,
}

impl EdgeIndex {
    /// Build the index from the connection list.
    ///
    /// Connections with an endpoint missing from `locations` are dropped with a
    /// warning. Explicit geometry is converted to `[lat, lon]`; without it (or
    /// with fewer than two points) the edge is a straight line between its
    /// endpoints. A later duplicate of the same pair replaces the earlier one.
    pub fn build(connections: &[Connection], locations: &[Location]) -> Self {
        let coords = coordinate_lookup(locations);
        let mut edges = HashMap::with_capacity(connections.len());

        for conn in connections {
            let (Some(&from_pos), Some(&to_pos)) =
                (coords.get(conn.from.as_str()), coords.get(conn.to.as_str()))
            else {
                warn!(
                    from = %conn.from,
                    to = %conn.to,
                    "dropping connection with unknown endpoint"
                );
                continue;
            };

            let (positions, has_geometry) = match conn.geometry.as_deref() {
                Some(points) if points.len() >= 2 => (
                    points.iter().copied().map(LatLon::from_lon_lat).collect(),
                    true,
                ),
                _ => (vec![from_pos, to_pos], false),
            };

            edges.insert(
                CanonicalKey::new(&conn.from, &conn.to),
                IndexedEdge {
                    declared_from: conn.from.clone(),
                    declared_to: conn.to.clone(),
                    positions,
                    has_geometry,
                },
            );
        }

        Self { edges }
    }

    /// Look up the connection between `a` and `b`, in either direction.
    pub fn get(&self, a: &str, b: &str) -> Option<&IndexedEdge> {
        self.edges.get(&CanonicalKey::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalKey, &IndexedEdge)> {
        self.edges.iter()
    }
}

/// Map from location id to its `[lat, lon]` position.
pub fn coordinate_lookup(locations: &[Location]) -> HashMap<&str, LatLon> {
    locations
        .iter()
        .map(|l| (l.id.as_str(), LatLon::new(l.y, l.x)))
        .collect()
}
