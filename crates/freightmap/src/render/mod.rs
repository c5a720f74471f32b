pub mod color;
pub mod map;
pub mod markers;
pub mod viewport;

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::geometry::{EdgeIndex, Segment, resolve_segments};
use crate::model::LocationId;
use crate::normalize::ViewModel;

use color::PriceRange;
use viewport::Bounds;

/// Everything the map draws, derived from one [`ViewModel`].
///
/// Pure function of its input; rebuild it whenever the view model changes.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub edge_index: EdgeIndex,
    pub optimized: Vec<Segment>,
    pub baseline: Vec<Segment>,
    pub price_range: Option<PriceRange>,
    /// Locations visited by the optimized route.
    pub on_path: HashSet<LocationId>,
    pub bounds: Option<Bounds>,
}

impl RenderState {
    pub fn derive(view: &ViewModel) -> Self {
        let edge_index = EdgeIndex::build(&view.connections, &view.locations);
        let optimized = resolve_segments(view.path(), &edge_index, &view.locations);
        let baseline = resolve_segments(&view.baseline_path, &edge_index, &view.locations);

        if edge_index.is_empty() && !view.connections.is_empty() {
            warn!(
                declared = view.connections.len(),
                "no connection could be placed on the map"
            );
        }
        debug!(
            connections = edge_index.len(),
            optimized = optimized.len(),
            baseline = baseline.len(),
            "derived render state"
        );
        for segment in optimized.iter().chain(&baseline) {
            trace!(key = %segment.key, points = segment.positions.len(), "segment");
        }

        Self {
            optimized,
            baseline,
            price_range: PriceRange::from_locations(&view.locations),
            on_path: view.path().iter().cloned().collect(),
            bounds: Bounds::enclosing(&view.locations),
            edge_index,
        }
    }

    pub fn is_on_path(&self, id: &str) -> bool {
        self.on_path.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, Location, RawRoute, RawRouteResponse};
    use crate::normalize::normalize;

    fn loc(id: &str, lon: f64, lat: f64, price: f64) -> Location {
        Location {
            id: id.to_string(),
            x: lon,
            y: lat,
            fuel_price: Some(price),
        }
    }

    fn sample_view() -> ViewModel {
        normalize(RawRouteResponse {
            nodes: vec![
                loc("El Paso", -106.5, 31.8, 3.2),
                loc("Midland", -102.1, 32.0, 3.9),
                loc("Abilene", -99.7, 32.4, 3.5),
            ],
            edges: vec![
                Connection {
                    from: "Midland".to_string(),
                    to: "El Paso".to_string(),
                    distance: 300.0,
                    geometry: Some(vec![[-102.1, 32.0], [-104.0, 31.5], [-106.5, 31.8]]),
                },
                Connection {
                    from: "Midland".to_string(),
                    to: "Abilene".to_string(),
                    distance: 150.0,
                    geometry: None,
                },
            ],
            route: RawRoute {
                path: vec![
                    "El Paso".to_string(),
                    "El Paso".to_string(),
                    "Midland".to_string(),
                    "Abilene".to_string(),
                ],
                ..Default::default()
            },
            baseline_path: Some(vec!["El Paso".to_string(), "Abilene".to_string()]),
            ..Default::default()
        })
    }

    #[test]
    fn test_derive_segments() {
        let state = RenderState::derive(&sample_view());
        assert_eq!(state.edge_index.len(), 2);
        assert_eq!(state.optimized.len(), 2);
        // Declared Midland -> El Paso, traversed El Paso -> Midland.
        assert_eq!(state.optimized[0].positions[0].lon, -106.5);
        assert_eq!(state.optimized[0].positions.len(), 3);
        assert_eq!(state.baseline.len(), 1);
        assert!(!state.baseline[0].from_index);
    }

    #[test]
    fn test_derive_membership_and_prices() {
        let state = RenderState::derive(&sample_view());
        assert!(state.is_on_path("Midland"));
        assert!(!state.is_on_path("Tyler"));
        let range = state.price_range.unwrap();
        assert_eq!(range.min, 3.2);
        assert_eq!(range.max, 3.9);
        let bounds = state.bounds.unwrap();
        assert_eq!(bounds.min_lon, -106.5);
        assert_eq!(bounds.max_lat, 32.4);
    }

    #[test]
    fn test_derive_with_unplaceable_connections() {
        let mut view = sample_view();
        view.connections = vec![Connection {
            from: "Nowhere".to_string(),
            to: "El Paso".to_string(),
            distance: 10.0,
            geometry: None,
        }];
        let state = RenderState::derive(&view);
        assert!(state.edge_index.is_empty());
        // Path pairs still resolve as straight lines.
        assert_eq!(state.optimized.len(), 2);
        assert!(state.optimized.iter().all(|s| !s.from_index));
    }

    #[test]
    fn test_derive_empty_graph() {
        let state = RenderState::derive(&normalize(RawRouteResponse::default()));
        assert!(state.bounds.is_none());
        assert!(state.price_range.is_none());
        assert!(state.optimized.is_empty());
    }

    #[test]
    fn test_derive_after_failure_has_no_routes() {
        let mut view = sample_view();
        view.clear_route();
        let state = RenderState::derive(&view);
        assert!(state.optimized.is_empty());
        assert!(state.baseline.is_empty());
        assert!(state.on_path.is_empty());
        assert_eq!(state.edge_index.len(), 2);
    }
}
