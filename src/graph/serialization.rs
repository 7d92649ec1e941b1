use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use petgraph::visit::EdgeRef;
use serde_json::Value;

use crate::graph::construction::to_dimacs_id;
use crate::graph::model::{EdgeAttributes, MatchGraph, NodeAttributes, RawEdge, RawGraph, RawNode};

/// Exports graphs in the formats [`GraphLoader`](crate::graph::GraphLoader) reads.
pub struct GraphWriter;

impl GraphWriter {
    /// DIMACS text: a header comment, `p edge n m`, one `e i j [capacity]` line per edge.
    pub fn to_dimacs_string(graph: &MatchGraph) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "c This encodes a graph in DIMACS format");
        let _ = writeln!(out, "p edge {} {}", graph.node_count(), graph.edge_count());
        for (u, v, attributes) in graph.edges() {
            let _ = write!(out, "e {} {}", to_dimacs_id(u), to_dimacs_id(v));
            if let Some(capacity) = attributes.capacity {
                let _ = write!(out, " {}", capacity);
            }
            out.push('\n');
        }
        out
    }

    pub fn write_dimacs<W: Write>(graph: &MatchGraph, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        writer.write_all(Self::to_dimacs_string(graph).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(graph: &MatchGraph, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create graph file {:?}", path))?;
        Self::write_dimacs(graph, file).with_context(|| format!("write graph file {:?}", path))
    }

    pub fn to_raw_graph(graph: &MatchGraph) -> RawGraph {
        let mut nodes = Vec::with_capacity(graph.node_count());
        for idx in graph.graph.node_indices() {
            nodes.push(RawNode {
                id: node_id(graph, idx.index()),
                attributes: build_node_attributes(&graph.graph[idx]),
            });
        }

        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge_ref in graph.graph.edge_references() {
            edges.push(RawEdge {
                source: node_id(graph, edge_ref.source().index()),
                target: node_id(graph, edge_ref.target().index()),
                attributes: build_edge_attributes(edge_ref.weight()),
            });
        }

        RawGraph {
            nodes,
            edges,
            graph_attributes: graph.graph_attributes.clone(),
        }
    }

    pub fn to_json_string(graph: &MatchGraph) -> Result<String> {
        let raw = Self::to_raw_graph(graph);
        Ok(serde_json::to_string_pretty(&raw)?)
    }
}

fn node_id(graph: &MatchGraph, v: usize) -> String {
    graph
        .node_name(v)
        .cloned()
        .unwrap_or_else(|| to_dimacs_id(v).to_string())
}

fn build_node_attributes(node: &NodeAttributes) -> IndexMap<String, Value> {
    let mut map = IndexMap::new();
    if let Some(label) = &node.label {
        map.insert("label".to_string(), Value::String(label.clone()));
    }
    for (key, value) in &node.extra {
        map.insert(key.clone(), value.clone());
    }
    map
}

fn build_edge_attributes(edge: &EdgeAttributes) -> IndexMap<String, Value> {
    let mut map = IndexMap::new();
    if let Some(capacity) = edge.capacity {
        map.insert("capacity".to_string(), Value::from(capacity));
    }
    for (key, value) in &edge.extra {
        map.insert(key.clone(), value.clone());
    }
    map
}
