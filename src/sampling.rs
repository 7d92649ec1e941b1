use anyhow::{Result, anyhow};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::graph::{EdgeAttributes, MatchGraph};

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub nodes: usize,
    /// Probability of each of the `n(n-1)/2` possible edges.
    pub edge_probability: f64,
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            nodes: 8,
            edge_probability: 0.3,
            seed: None,
        }
    }
}

/// Erdős–Rényi style random graphs for tests and benchmarks.
pub struct GraphSampler;

impl GraphSampler {
    pub fn sample(config: &SampleConfig) -> Result<MatchGraph> {
        let seed = config.seed.unwrap_or_else(random_seed);
        Self::sample_seeded(config, seed)
    }

    /// `count` graphs, the i-th seeded with `seed + i`.
    pub fn sample_many(config: &SampleConfig, count: usize) -> Result<Vec<MatchGraph>> {
        let base_seed = config.seed.unwrap_or_else(random_seed);
        (0..count)
            .into_par_iter()
            .map(|i| Self::sample_seeded(config, base_seed.wrapping_add(i as u64)))
            .collect()
    }

    fn sample_seeded(config: &SampleConfig, seed: u64) -> Result<MatchGraph> {
        if !(0.0..=1.0).contains(&config.edge_probability) {
            return Err(anyhow!(
                "Edge probability {} is outside [0, 1]",
                config.edge_probability
            ));
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut graph = MatchGraph::with_nodes(config.nodes);
        for u in 0..config.nodes {
            for v in (u + 1)..config.nodes {
                if rng.gen_bool(config.edge_probability) {
                    graph.add_edge(u, v, EdgeAttributes::default())?;
                }
            }
        }
        Ok(graph)
    }
}

/// Place `parts` side by side; node ids of later parts are shifted past earlier ones.
pub fn disjoint_union(parts: &[MatchGraph]) -> Result<MatchGraph> {
    let total = parts.iter().map(MatchGraph::node_count).sum();
    let mut union = MatchGraph::with_nodes(total);
    let mut offset = 0;
    for part in parts {
        for (u, v, attributes) in part.edges() {
            union.add_edge(u + offset, v + offset, attributes.clone())?;
        }
        offset += part.node_count();
    }
    Ok(union)
}

fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_graph() {
        let config = SampleConfig {
            nodes: 12,
            edge_probability: 0.4,
            seed: Some(7),
        };
        let a = GraphSampler::sample(&config).unwrap();
        let b = GraphSampler::sample(&config).unwrap();
        let edges_a: Vec<_> = a.edges().map(|(u, v, _)| (u, v)).collect();
        let edges_b: Vec<_> = b.edges().map(|(u, v, _)| (u, v)).collect();
        assert_eq!(edges_a, edges_b);
        assert_eq!(a.node_count(), 12);
    }

    #[test]
    fn extreme_probabilities() {
        let empty = GraphSampler::sample(&SampleConfig {
            nodes: 5,
            edge_probability: 0.0,
            seed: Some(1),
        })
        .unwrap();
        assert_eq!(empty.edge_count(), 0);

        let complete = GraphSampler::sample(&SampleConfig {
            nodes: 5,
            edge_probability: 1.0,
            seed: Some(1),
        })
        .unwrap();
        assert_eq!(complete.edge_count(), 10);

        assert!(
            GraphSampler::sample(&SampleConfig {
                nodes: 5,
                edge_probability: 1.5,
                seed: Some(1),
            })
            .is_err()
        );
    }

    #[test]
    fn union_shifts_later_parts() {
        let mut a = MatchGraph::with_nodes(2);
        a.add_edge(0, 1, EdgeAttributes::default()).unwrap();
        let mut b = MatchGraph::with_nodes(3);
        b.add_edge(1, 2, EdgeAttributes::default()).unwrap();

        let union = disjoint_union(&[a, b]).unwrap();
        assert_eq!(union.node_count(), 5);
        let edges: Vec<_> = union.edges().map(|(u, v, _)| (u, v)).collect();
        assert_eq!(edges, vec![(0, 1), (3, 4)]);
    }
}
