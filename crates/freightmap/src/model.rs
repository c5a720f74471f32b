//! Wire types for the `/route` endpoint.
//!
//! Everything here mirrors the JSON body as it arrives. Optional fields stay
//! optional; [`crate::normalize`] is the only place that resolves them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable location identifier (a city name in practice).
pub type LocationId = String;

/// API version tag this client was written against.
pub const API_VERSION: &str = "v1";

/// A graph node with coordinates and an optional fuel price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_price: Option<f64>,
}

/// A graph edge. Lookups treat it as undirected, but `geometry` is ordered
/// from `from` to `to` as declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "from_", alias = "from")]
    pub from: LocationId,
    pub to: LocationId,
    #[serde(default)]
    pub distance: f64,
    /// Ordered `[lon, lat]` points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub fuel_cost: f64,
}

/// Fuel cost comparison between the optimized route and the
/// shortest-distance baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline_fuel_cost: f64,
    pub optimized_fuel_cost: f64,
    pub savings_amount: f64,
    pub savings_percent: f64,
}

/// The route object as returned by the API. Numeric fields may be missing or
/// `null` in older payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub path: Vec<LocationId>,
    #[serde(default)]
    pub total_distance: Option<f64>,
    #[serde(default)]
    pub fuel_cost: Option<f64>,
    #[serde(default)]
    pub objective: Option<f64>,
    #[serde(default)]
    pub expanded: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RouteSummary>,
}

/// Full body of a `GET /route` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRouteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Location>,
    #[serde(default)]
    pub edges: Vec<Connection>,
    #[serde(default)]
    pub route: RawRoute,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_path: Option<Vec<LocationId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

/// Path-finding algorithm run by the routing service.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Dijkstra,
    Astar,
    Greedy,
}

impl Algorithm {
    pub fn all() -> &'static [Algorithm] {
        &[Algorithm::Dijkstra, Algorithm::Astar, Algorithm::Greedy]
    }

    /// Value sent in the `algorithm` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::Astar => "astar",
            Self::Greedy => "greedy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::Astar => "A*",
            Self::Greedy => "Greedy (cheapest fuel)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dijkstra" => Some(Self::Dijkstra),
            "astar" => Some(Self::Astar),
            "greedy" => Some(Self::Greedy),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
