use anyhow::{Result, anyhow, bail};
use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Dense node index in `[0, node_count)`.
pub type NodeId = usize;
/// Dense edge index in insertion order.
pub type EdgeId = usize;
/// External node name (DIMACS id or JSON id).
pub type GraphId = String;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NodeAttributes {
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EdgeAttributes {
    /// Optional trailing column of a DIMACS `e` line.
    pub capacity: Option<i64>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl EdgeAttributes {
    pub fn with_capacity(capacity: i64) -> Self {
        Self {
            capacity: Some(capacity),
            extra: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
    #[serde(default)]
    pub graph_attributes: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: GraphId,
    #[serde(default)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: GraphId,
    pub target: GraphId,
    #[serde(default)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

pub type LabeledGraph = UnGraph<NodeAttributes, EdgeAttributes>;

/// Undirected multigraph without self-loops.
///
/// Nodes are addressed by dense [`NodeId`]s; the lookup tables keep the
/// external names so results can be written back in the input's terms.
#[derive(Debug, Clone, Default)]
pub struct MatchGraph {
    pub graph: LabeledGraph,
    pub node_lookup: IndexMap<GraphId, NodeIndex>,
    pub reverse_lookup: IndexMap<NodeIndex, GraphId>,
    pub graph_attributes: IndexMap<String, serde_json::Value>,
}

impl MatchGraph {
    /// Graph with `node_count` isolated nodes named `1..=node_count`.
    pub fn with_nodes(node_count: usize) -> Self {
        let mut graph = Self {
            graph: LabeledGraph::with_capacity(node_count, 0),
            node_lookup: IndexMap::with_capacity(node_count),
            reverse_lookup: IndexMap::with_capacity(node_count),
            graph_attributes: IndexMap::new(),
        };
        for v in 0..node_count {
            graph.push_node((v + 1).to_string(), NodeAttributes::default());
        }
        graph
    }

    /// Same nodes (names and attributes) as `other`, no edges.
    pub fn empty_like(other: &MatchGraph) -> Self {
        let mut graph = Self {
            graph: LabeledGraph::with_capacity(other.node_count(), other.node_count() / 2),
            node_lookup: IndexMap::with_capacity(other.node_count()),
            reverse_lookup: IndexMap::with_capacity(other.node_count()),
            graph_attributes: other.graph_attributes.clone(),
        };
        for idx in other.graph.node_indices() {
            let id = other
                .reverse_lookup
                .get(&idx)
                .cloned()
                .unwrap_or_else(|| (idx.index() + 1).to_string());
            graph.push_node(id, other.graph[idx].clone());
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Append a node under an external name that must not already exist.
    pub fn add_node(&mut self, id: GraphId, attributes: NodeAttributes) -> Result<NodeId> {
        if self.node_lookup.contains_key(&id) {
            bail!("Duplicate node id '{}'", id);
        }
        Ok(self.push_node(id, attributes))
    }

    /// Add the undirected edge `{u, v}`. Parallel edges are kept; loops are rejected.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, attributes: EdgeAttributes) -> Result<EdgeId> {
        let n = self.node_count();
        if u >= n || v >= n {
            bail!("Edge {{{}, {}}} references a node outside 0..{}", u, v, n);
        }
        if u == v {
            bail!("Self-loop at node {} is not supported", u);
        }
        let edge = self
            .graph
            .add_edge(NodeIndex::new(u), NodeIndex::new(v), attributes);
        Ok(edge.index())
    }

    /// Incident edges of `v` as `(neighbor, edge)` pairs.
    pub fn neighbors(&self, v: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        let node = NodeIndex::new(v);
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (other.index(), edge.id().index())
        })
    }

    pub fn degree(&self, v: NodeId) -> usize {
        self.graph.edges(NodeIndex::new(v)).count()
    }

    pub fn endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.graph
            .edge_endpoints(EdgeIndex::new(edge))
            .map(|(a, b)| (a.index(), b.index()))
    }

    pub fn edge_attributes(&self, edge: EdgeId) -> Option<&EdgeAttributes> {
        self.graph.edge_weight(EdgeIndex::new(edge))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &EdgeAttributes)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index(), edge.weight()))
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        u < self.node_count()
            && v < self.node_count()
            && self
                .graph
                .find_edge(NodeIndex::new(u), NodeIndex::new(v))
                .is_some()
    }

    pub fn node_name(&self, v: NodeId) -> Option<&GraphId> {
        self.reverse_lookup.get(&NodeIndex::new(v))
    }

    pub fn resolve(&self, id: &str) -> Result<NodeId> {
        self.node_lookup
            .get(id)
            .map(|idx| idx.index())
            .ok_or_else(|| anyhow!("Unknown node id: {}", id))
    }

    fn push_node(&mut self, id: GraphId, attributes: NodeAttributes) -> NodeId {
        let idx = self.graph.add_node(attributes);
        self.node_lookup.insert(id.clone(), idx);
        self.reverse_lookup.insert(idx, id);
        idx.index()
    }
}
