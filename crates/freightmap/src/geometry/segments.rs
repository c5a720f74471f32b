use tracing::debug;

use super::edge_index::{EdgeIndex, coordinate_lookup};
use super::types::Segment;
use crate::model::{Location, LocationId};

/// Turn an ordered path into drawable segments, in traversal order.
///
/// For each consecutive pair `(u, v)`:
/// * `u == v` is skipped.
/// * An indexed connection is used as-is when declared `u → v`, and reversed
///   end-to-end when declared `v → u`, so intermediate points follow travel.
/// * Otherwise a straight line joins the two locations. If either location is
///   unknown the pair produces no segment.
pub fn resolve_segments(
    path: &[LocationId],
    index: &EdgeIndex,
    locations: &[Location],
) -> Vec<Segment> {
    let coords = coordinate_lookup(locations);
    let mut segments = Vec::with_capacity(path.len().saturating_sub(1));

    for (i, pair) in path.windows(2).enumerate() {
        let (u, v) = (pair[0].as_str(), pair[1].as_str());
        if u == v {
            continue;
        }

        let segment = match index.get(u, v) {
            Some(edge) => {
                let mut positions = edge.positions.clone();
                if !edge.runs(u, v) {
                    positions.reverse();
                }
                Segment {
                    key: Segment::key_for(i, u, v),
                    from: u.to_string(),
                    to: v.to_string(),
                    positions,
                    from_index: true,
                }
            }
            None => match (coords.get(u), coords.get(v)) {
                (Some(&a), Some(&b)) => Segment {
                    key: Segment::key_for(i, u, v),
                    from: u.to_string(),
                    to: v.to_string(),
                    positions: vec![a, b],
                    from_index: false,
                },
                _ => {
                    debug!(from = u, to = v, "skipping segment with unknown location");
                    continue;
                }
            },
        };

        segments.push(segment);
    }

    segments
}
