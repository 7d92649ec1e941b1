use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

use crate::graph::MatchGraph;
use crate::matching::engine::{BlossomEngine, SearchStats};
use crate::matching::extract::MatchingExtractor;

/// Where the neighbor scan of a node continues after a blossom was shrunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShrinkPolicy {
    /// Start over at the first neighbor; earlier neighbors may have become actionable.
    #[default]
    RestartScan,
    /// Carry on with the next neighbor.
    Resume,
}

#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub shrink_policy: ShrinkPolicy,
    pub verify_output: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            shrink_policy: ShrinkPolicy::RestartScan,
            verify_output: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchingSummary {
    pub matching: MatchGraph,
    pub stats: SearchStats,
    pub duration: Duration,
}

impl MatchingSummary {
    pub fn size(&self) -> usize {
        self.matching.edge_count()
    }
}

/// Runs the blossom search on one graph and extracts the result.
#[derive(Debug, Clone, Default)]
pub struct MaximumMatching {
    config: MatcherConfig,
}

impl MaximumMatching {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn compute(&self, graph: &MatchGraph) -> Result<MatchingSummary> {
        let start = Instant::now();
        let mut engine = BlossomEngine::new(graph, self.config.shrink_policy);
        engine.run()?;
        let stats = engine.stats();
        let state = engine.into_state();
        let matching = MatchingExtractor::extract(graph, &state, self.config.verify_output)?;
        let duration = start.elapsed();
        debug!(
            "Maximum matching of {} edges computed in {:?}",
            matching.edge_count(),
            duration
        );
        Ok(MatchingSummary {
            matching,
            stats,
            duration,
        })
    }
}

/// Maximum matching of `graph` with the default configuration.
pub fn maximum_matching(graph: &MatchGraph) -> Result<MatchGraph> {
    Ok(MaximumMatching::default().compute(graph)?.matching)
}
