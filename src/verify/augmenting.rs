use anyhow::Result;
use rayon::prelude::*;

use crate::graph::{MatchGraph, NodeId};
use crate::verify::degree::DegreeCheck;

/// Exhaustive search for an augmenting path relative to a matching.
///
/// Explores every simple alternating path from every exposed node, so it is
/// only meant for small graphs. The exposed start nodes are searched in parallel.
pub struct AugmentingPathSearch;

impl AugmentingPathSearch {
    /// Some augmenting path `start, .., end` between two exposed nodes, if any exists.
    pub fn find(graph: &MatchGraph, matching: &MatchGraph) -> Result<Option<Vec<NodeId>>> {
        DegreeCheck::check_subgraph(graph, matching)?;
        let mate = partner_map(matching);
        let exposed: Vec<NodeId> = (0..graph.node_count())
            .filter(|&v| mate[v].is_none())
            .collect();

        Ok(exposed
            .par_iter()
            .find_map_any(|&start| search_from(graph, &mate, start)))
    }

    pub fn exists(graph: &MatchGraph, matching: &MatchGraph) -> Result<bool> {
        Ok(Self::find(graph, matching)?.is_some())
    }
}

fn partner_map(matching: &MatchGraph) -> Vec<Option<NodeId>> {
    let mut mate = vec![None; matching.node_count()];
    for (u, v, _) in matching.edges() {
        mate[u] = Some(v);
        mate[v] = Some(u);
    }
    mate
}

fn search_from(graph: &MatchGraph, mate: &[Option<NodeId>], start: NodeId) -> Option<Vec<NodeId>> {
    let mut path = vec![start];
    let mut on_path = vec![false; graph.node_count()];
    on_path[start] = true;
    extend(graph, mate, &mut path, &mut on_path)
}

/// `path` ends on a node whose next edge must be unmatched.
fn extend(
    graph: &MatchGraph,
    mate: &[Option<NodeId>],
    path: &mut Vec<NodeId>,
    on_path: &mut [bool],
) -> Option<Vec<NodeId>> {
    let tail = *path.last()?;
    for (next, _) in graph.neighbors(tail) {
        if on_path[next] || mate[tail] == Some(next) {
            continue;
        }
        match mate[next] {
            None => {
                let mut found = path.clone();
                found.push(next);
                return Some(found);
            }
            Some(partner) if !on_path[partner] => {
                path.extend([next, partner]);
                on_path[next] = true;
                on_path[partner] = true;
                if let Some(found) = extend(graph, mate, path, on_path) {
                    return Some(found);
                }
                path.truncate(path.len() - 2);
                on_path[next] = false;
                on_path[partner] = false;
            }
            Some(_) => {}
        }
    }
    None
}
