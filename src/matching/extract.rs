use anyhow::Result;

use crate::graph::{EdgeAttributes, MatchGraph};
use crate::matching::forest::ForestState;
use crate::verify::DegreeCheck;

/// Writes the final partner map out as a graph of matching edges.
pub struct MatchingExtractor;

impl MatchingExtractor {
    /// One edge `{v, mate(v)}` per matched pair, on a copy of `graph`'s nodes.
    ///
    /// With `verify` set, the result is rejected if any node ends up with more
    /// than one incident edge.
    pub fn extract(graph: &MatchGraph, state: &ForestState, verify: bool) -> Result<MatchGraph> {
        let mut matching = MatchGraph::empty_like(graph);
        for (v, mate) in state.matched_pairs() {
            matching.add_edge(v, mate, EdgeAttributes::default())?;
        }
        if verify {
            DegreeCheck::check(&matching)?;
        }
        Ok(matching)
    }
}
