//! Reconcile a raw `/route` response into a render-ready [`ViewModel`].

use tracing::info;

use crate::model::{
    API_VERSION, Comparison, Connection, Location, LocationId, RawRoute, RawRouteResponse,
    RouteSummary,
};

/// A route with every optional field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Path with adjacent duplicates collapsed.
    pub path: Vec<LocationId>,
    pub total_distance: f64,
    pub fuel_cost: f64,
    pub objective: f64,
    /// Nodes explored by the algorithm. Informational only.
    pub expanded: u64,
    pub notes: Option<String>,
    pub summary: RouteSummary,
}

/// Render-ready snapshot of one response. Replaced wholesale on every
/// successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub api_version: Option<String>,
    pub locations: Vec<Location>,
    pub connections: Vec<Connection>,
    /// `None` after a failed fetch.
    pub route: Option<Route>,
    pub baseline_path: Vec<LocationId>,
    pub comparison: Option<Comparison>,
}

impl ViewModel {
    /// Drop route, baseline and comparison so no stale result is shown next
    /// to an error.
    pub fn clear_route(&mut self) {
        self.route = None;
        self.baseline_path.clear();
        self.comparison = None;
    }

    pub fn path(&self) -> &[LocationId] {
        match &self.route {
            Some(route) => &route.path,
            None => &[],
        }
    }

    #[cfg(test)]
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn location_ids(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|l| l.id.as_str())
    }
}

/// Collapse immediate repeats: `A A B C C` becomes `A B C`.
/// Non-adjacent revisits are kept.
pub fn dedup_path(path: &[LocationId]) -> Vec<LocationId> {
    let mut out: Vec<LocationId> = Vec::with_capacity(path.len());
    for id in path {
        if out.last() != Some(id) {
            out.push(id.clone());
        }
    }
    out
}

/// Normalize a raw response. Never fails; missing optional fields get
/// defaults.
pub fn normalize(raw: RawRouteResponse) -> ViewModel {
    match raw.api_version.as_deref() {
        Some(API_VERSION) | None => {}
        Some(other) => info!(
            expected = API_VERSION,
            received = other,
            "unexpected API version, continuing with best-effort decoding"
        ),
    }

    ViewModel {
        api_version: raw.api_version,
        locations: raw.nodes,
        connections: raw.edges,
        route: Some(resolve_route(raw.route)),
        baseline_path: dedup_path(&raw.baseline_path.unwrap_or_default()),
        comparison: raw.comparison,
    }
}

fn resolve_route(raw: RawRoute) -> Route {
    let total_distance = raw.total_distance.unwrap_or(0.0);
    let fuel_cost = raw.fuel_cost.unwrap_or(0.0);
    let summary = raw.summary.unwrap_or(RouteSummary {
        distance_km: total_distance,
        fuel_cost,
    });

    Route {
        path: dedup_path(&raw.path),
        total_distance,
        fuel_cost,
        objective: raw.objective.unwrap_or(0.0),
        expanded: raw.expanded.unwrap_or(0),
        notes: raw.notes,
        summary,
    }
}

/// The start/end identifiers currently selected by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSelection {
    pub from: Option<LocationId>,
    pub to: Option<LocationId>,
}

impl EndpointSelection {
    pub fn new(from: Option<LocationId>, to: Option<LocationId>) -> Self {
        Self { from, to }
    }

    pub fn is_unset(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Seed both endpoints from the first and last path element, but only
    /// when neither was chosen yet. Returns whether anything changed.
    pub fn seed_from_path(&mut self, path: &[LocationId]) -> bool {
        if !self.is_unset() {
            return false;
        }
        match (path.first(), path.last()) {
            (Some(first), Some(last)) => {
                self.from = Some(first.clone());
                self.to = Some(last.clone());
                true
            }
            _ => false,
        }
    }

    /// Clear any endpoint that does not name a known location.
    pub fn retain_known<'a>(&mut self, mut known: impl Iterator<Item = &'a str> + Clone) {
        if let Some(from) = &self.from {
            if !known.clone().any(|id| id == from) {
                self.from = None;
            }
        }
        if let Some(to) = &self.to {
            if !known.any(|id| id == to) {
                self.to = None;
            }
        }
    }
}
