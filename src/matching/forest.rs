//! Alternating forest state shared by the blossom search.
//!
//! Three node-indexed arrays carry the whole search:
//! - `mate`: current matching partner, or the node itself when exposed;
//! - `attach`: the node through which a node was pulled into the forest,
//!   or the node itself when it is not linked yet;
//! - `bases`: the outer representative of the blossom holding each node.
//!
//! Outer/inner status is never stored. It is recomputed from `mate` and
//! `attach`, and a node's kind depends on its *partner's* attachment.

use crate::graph::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Outer,
    Inner,
    Unattached,
}

/// Union-style representative pointers for implicitly contracted blossoms.
///
/// Every contraction rewrites the representative of all affected nodes
/// directly, so `find` is a single lookup.
#[derive(Debug, Clone)]
pub struct BlossomBases {
    base: Vec<NodeId>,
}

impl BlossomBases {
    pub fn new(node_count: usize) -> Self {
        Self {
            base: (0..node_count).collect(),
        }
    }

    #[inline]
    pub fn find(&self, v: NodeId) -> NodeId {
        self.base[v]
    }

    /// Point every node whose representative is marked in `members` at `root`.
    pub fn contract(&mut self, members: &[bool], root: NodeId) {
        for base in self.base.iter_mut() {
            if members[*base] {
                *base = root;
            }
        }
    }

    pub fn reset(&mut self) {
        for (v, base) in self.base.iter_mut().enumerate() {
            *base = v;
        }
    }

    /// Number of distinct blossom representatives.
    pub fn class_count(&self) -> usize {
        self.base
            .iter()
            .enumerate()
            .filter(|&(v, &base)| v == base)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ForestState {
    pub(crate) mate: Vec<NodeId>,
    pub(crate) attach: Vec<NodeId>,
    pub(crate) bases: BlossomBases,
    pub(crate) examined: Vec<bool>,
}

impl ForestState {
    pub fn new(node_count: usize) -> Self {
        Self {
            mate: (0..node_count).collect(),
            attach: (0..node_count).collect(),
            bases: BlossomBases::new(node_count),
            examined: vec![false; node_count],
        }
    }

    pub fn len(&self) -> usize {
        self.mate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mate.is_empty()
    }

    #[inline]
    pub fn mate(&self, v: NodeId) -> NodeId {
        self.mate[v]
    }

    #[inline]
    pub fn attach(&self, v: NodeId) -> NodeId {
        self.attach[v]
    }

    #[inline]
    pub fn base(&self, v: NodeId) -> NodeId {
        self.bases.find(v)
    }

    pub fn is_examined(&self, v: NodeId) -> bool {
        self.examined[v]
    }

    pub fn is_exposed(&self, v: NodeId) -> bool {
        self.mate[v] == v
    }

    /// A matched pair turns outer as soon as either side has been grown in.
    pub fn classify(&self, v: NodeId) -> NodeKind {
        let mate = self.mate[v];
        if mate == v || self.attach[mate] != mate {
            NodeKind::Outer
        } else if self.attach[v] == v {
            NodeKind::Unattached
        } else {
            NodeKind::Inner
        }
    }

    /// Record `{u, v}` as a matching edge.
    pub(crate) fn pair(&mut self, u: NodeId, v: NodeId) {
        self.mate[u] = v;
        self.mate[v] = u;
    }

    /// Forget the forest and all blossoms; the matching is kept.
    pub(crate) fn reset_forest(&mut self) {
        for (v, attach) in self.attach.iter_mut().enumerate() {
            *attach = v;
        }
        self.bases.reset();
        self.examined.iter_mut().for_each(|flag| *flag = false);
    }

    /// Matched pairs as `(v, mate)` with `v < mate`.
    pub fn matched_pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.mate
            .iter()
            .enumerate()
            .filter(|&(v, &mate)| mate > v)
            .map(|(v, &mate)| (v, mate))
    }

    pub fn matching_size(&self) -> usize {
        self.matched_pairs().count()
    }

    /// Every partner relation is symmetric.
    pub fn is_consistent(&self) -> bool {
        self.mate
            .iter()
            .enumerate()
            .all(|(v, &mate)| self.mate[mate] == v)
    }
}
