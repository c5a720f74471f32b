pub mod edge_index;
pub mod segments;
pub mod types;

#[cfg(test)]
mod tests;

pub use edge_index::EdgeIndex;
pub use segments::resolve_segments;
pub use types::{LatLon, Segment};
