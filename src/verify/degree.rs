use anyhow::{Result, bail};

use crate::graph::MatchGraph;

/// Confirms a graph is a matching: every node has at most one incident edge.
pub struct DegreeCheck;

impl DegreeCheck {
    pub fn check(matching: &MatchGraph) -> Result<()> {
        for v in 0..matching.node_count() {
            let degree = matching.degree(v);
            if degree > 1 {
                bail!("Node {} has degree {} in the matching", v, degree);
            }
        }
        Ok(())
    }

    /// Additionally require every matching edge to exist in `graph`.
    pub fn check_subgraph(graph: &MatchGraph, matching: &MatchGraph) -> Result<()> {
        if graph.node_count() != matching.node_count() {
            bail!(
                "Matching has {} nodes, graph has {}",
                matching.node_count(),
                graph.node_count()
            );
        }
        Self::check(matching)?;
        for (u, v, _) in matching.edges() {
            if !graph.has_edge(u, v) {
                bail!("Matching edge {{{}, {}}} is not an edge of the graph", u, v);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphLoader;

    #[test]
    fn disjoint_edges_pass() {
        let graph = GraphLoader::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let matching = GraphLoader::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        assert!(DegreeCheck::check_subgraph(&graph, &matching).is_ok());
    }

    #[test]
    fn shared_endpoint_fails() {
        let matching = GraphLoader::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let err = DegreeCheck::check(&matching).unwrap_err();
        assert!(err.to_string().contains("Node 1 has degree 2"));
    }

    #[test]
    fn foreign_edge_fails() {
        let graph = GraphLoader::from_edges(3, &[(0, 1)]).unwrap();
        let matching = GraphLoader::from_edges(3, &[(0, 2)]).unwrap();
        assert!(DegreeCheck::check_subgraph(&graph, &matching).is_err());
    }
}
