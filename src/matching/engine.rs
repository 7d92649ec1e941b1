use anyhow::{Result, bail};
use log::{debug, trace};

use crate::graph::{MatchGraph, NodeId};
use crate::matching::forest::{ForestState, NodeKind};
use crate::matching::path::{first_common, trace_path};
use crate::matching::workflow::ShrinkPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub scans: usize,
    pub grows: usize,
    pub shrinks: usize,
    pub augmentations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanOutcome {
    Augmented,
    Exhausted,
}

/// Edmonds' cardinality matching search over an alternating forest.
///
/// Blossoms are contracted only through the base pointers; adjacency is
/// never rewritten and blossoms are never expanded. Every augmentation
/// discards the forest and starts a fresh one around the larger matching.
pub struct BlossomEngine<'g> {
    graph: &'g MatchGraph,
    state: ForestState,
    policy: ShrinkPolicy,
    stats: SearchStats,
}

impl<'g> BlossomEngine<'g> {
    pub fn new(graph: &'g MatchGraph, policy: ShrinkPolicy) -> Self {
        Self {
            graph,
            state: ForestState::new(graph.node_count()),
            policy,
            stats: SearchStats::default(),
        }
    }

    pub fn state(&self) -> &ForestState {
        &self.state
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn into_state(self) -> ForestState {
        self.state
    }

    /// Scan outer nodes until none is left unexamined; the matching is then maximum.
    pub fn run(&mut self) -> Result<()> {
        debug!(
            "Blossom search: nodes {}, edges {}, policy {:?}",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.policy
        );
        while let Some(x) = self.next_unexamined_outer() {
            self.stats.scans += 1;
            if self.examine(x)? == ScanOutcome::Augmented {
                debug_assert!(self.state.is_consistent());
            }
        }
        debug!(
            "Blossom search finished: matching size {}, {:?}",
            self.state.matching_size(),
            self.stats
        );
        Ok(())
    }

    fn next_unexamined_outer(&self) -> Option<NodeId> {
        (0..self.state.len())
            .find(|&v| !self.state.is_examined(v) && self.state.classify(v) == NodeKind::Outer)
    }

    fn examine(&mut self, x: NodeId) -> Result<ScanOutcome> {
        trace!("Scanning node {}", x);
        let neighbors: Vec<NodeId> = self.graph.neighbors(x).map(|(y, _)| y).collect();

        let mut cursor = 0;
        while cursor < neighbors.len() {
            let y = neighbors[cursor];
            cursor += 1;

            match self.state.classify(y) {
                NodeKind::Unattached => self.grow(x, y),
                NodeKind::Outer if self.state.base(x) != self.state.base(y) => {
                    let path_x = trace_path(&self.state, x)?;
                    let path_y = trace_path(&self.state, y)?;
                    match first_common(&path_x, &path_y, self.state.len()) {
                        None => {
                            self.augment(x, y, &path_x, &path_y);
                            return Ok(ScanOutcome::Augmented);
                        }
                        Some(meet) => {
                            self.shrink(x, y, meet, &path_x, &path_y)?;
                            if self.policy == ShrinkPolicy::RestartScan {
                                cursor = 0;
                            }
                        }
                    }
                }
                NodeKind::Outer | NodeKind::Inner => {}
            }
        }

        self.state.examined[x] = true;
        Ok(ScanOutcome::Exhausted)
    }

    fn grow(&mut self, x: NodeId, y: NodeId) {
        trace!("Grow {} from {}", y, x);
        self.state.attach[y] = x;
        self.stats.grows += 1;
    }

    /// Flip both root paths plus the edge `{x, y}`; the matching gains one edge.
    fn augment(&mut self, x: NodeId, y: NodeId, path_x: &[NodeId], path_y: &[NodeId]) {
        debug!(
            "Augment along {{{}, {}}} (path lengths {} and {})",
            x,
            y,
            path_x.len(),
            path_y.len()
        );
        for path in [path_x, path_y] {
            for &node in path.iter().skip(1).step_by(2) {
                let parent = self.state.attach[node];
                self.state.pair(parent, node);
            }
        }
        self.state.pair(x, y);
        self.state.reset_forest();
        self.stats.augmentations += 1;
    }

    /// Contract the odd cycle closed by `{x, y}` whose paths meet at `meet`.
    fn shrink(
        &mut self,
        x: NodeId,
        y: NodeId,
        meet: NodeId,
        path_x: &[NodeId],
        path_y: &[NodeId],
    ) -> Result<()> {
        let root = self.state.base(meet);
        debug!("Shrink along {{{}, {}}} into blossom based at {}", x, y, root);

        let mut on_cycle = vec![false; self.state.len()];
        if !self.relink_segment(path_x, root, root, &mut on_cycle) {
            bail!(
                "Blossom base {} of meeting node {} is not on path {:?}",
                root,
                meet,
                path_x
            );
        }
        self.relink_segment(path_y, meet, root, &mut on_cycle);

        if self.state.base(x) != root {
            self.state.attach[x] = y;
        }
        if self.state.base(y) != root {
            self.state.attach[y] = x;
        }

        self.state.bases.contract(&on_cycle, root);
        self.stats.shrinks += 1;
        Ok(())
    }

    /// Walk `path` up to and including `stop`, re-pointing the parent of every
    /// odd-position node that is not already inside the blossom at `root`.
    /// Returns whether `stop` was reached.
    fn relink_segment(
        &mut self,
        path: &[NodeId],
        stop: NodeId,
        root: NodeId,
        on_cycle: &mut [bool],
    ) -> bool {
        for (pos, &node) in path.iter().enumerate() {
            on_cycle[node] = true;
            if pos % 2 == 1 {
                let parent = self.state.attach[node];
                if self.state.base(parent) != root {
                    self.state.attach[parent] = node;
                }
            }
            if node == stop {
                return true;
            }
        }
        false
    }
}
