use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use indexmap::IndexMap;
use log::{debug, warn};

use crate::graph::model::{EdgeAttributes, MatchGraph, NodeAttributes, NodeId, RawGraph};

/// Turns DIMACS or JSON text into a [`MatchGraph`].
#[derive(Debug, Default)]
pub struct GraphLoader;

impl GraphLoader {
    /// Load a graph file; `.json` files use the JSON format, anything else is DIMACS.
    pub fn from_path(path: &Path) -> Result<MatchGraph> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read graph file {:?}", path))?;
        let is_json = path
            .extension()
            .and_then(OsStr::to_str)
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&text).with_context(|| format!("parse JSON graph {:?}", path))
        } else {
            Self::from_dimacs_str(&text).with_context(|| format!("parse DIMACS graph {:?}", path))
        }
    }

    /// Read DIMACS graph data from a reader.
    pub fn from_dimacs_reader<R: Read>(mut reader: R) -> Result<MatchGraph> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_dimacs_str(&buf)
    }

    /// Parse the DIMACS edge format: comment lines (`c`) up to the problem line
    /// `p <kind> <nodes> <edges>`, then `e <i> <j> [capacity]` lines with 1-based ids.
    pub fn from_dimacs_str(text: &str) -> Result<MatchGraph> {
        let mut lines = text.lines().enumerate();

        let (problem_no, problem) = loop {
            let (no, line) = lines
                .next()
                .ok_or_else(|| anyhow!("Could not find problem line in DIMACS input"))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }
            break (no + 1, trimmed);
        };

        let mut fields = problem.split_whitespace();
        if fields.next() != Some("p") {
            bail!(
                "Line {}: expected DIMACS problem line, found '{}'",
                problem_no,
                problem
            );
        }
        let _kind = fields
            .next()
            .ok_or_else(|| anyhow!("Line {}: problem line lacks a kind", problem_no))?;
        let node_count = parse_count(fields.next(), problem_no, "node count")?;
        let declared_edges = parse_count(fields.next(), problem_no, "edge count")?;

        let mut graph = MatchGraph::with_nodes(node_count);
        for (no, line) in lines {
            let line_no = no + 1;
            let trimmed = line.trim();
            if !trimmed.starts_with('e') {
                continue;
            }
            let mut fields = trimmed.split_whitespace().skip(1);
            let u = from_dimacs_id(parse_count(fields.next(), line_no, "first endpoint")?)
                .with_context(|| format!("line {}", line_no))?;
            let v = from_dimacs_id(parse_count(fields.next(), line_no, "second endpoint")?)
                .with_context(|| format!("line {}", line_no))?;
            let attributes = match fields.next() {
                Some(raw) => EdgeAttributes::with_capacity(raw.parse::<i64>().map_err(|_| {
                    anyhow!("Line {}: invalid edge capacity '{}'", line_no, raw)
                })?),
                None => EdgeAttributes::default(),
            };
            graph
                .add_edge(u, v, attributes)
                .with_context(|| format!("line {}", line_no))?;
        }

        if graph.edge_count() != declared_edges {
            warn!(
                "DIMACS problem line declares {} edges, found {}",
                declared_edges,
                graph.edge_count()
            );
        }
        debug!(
            "Loaded DIMACS graph: nodes {}, edges {}",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Parse a JSON string into a graph.
    pub fn from_json_str(json: &str) -> Result<MatchGraph> {
        let raw: RawGraph = serde_json::from_str(json)?;
        Self::from_raw_graph(raw)
    }

    /// Build a graph with `node_count` nodes from 0-based endpoint pairs.
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Result<MatchGraph> {
        let mut graph = MatchGraph::with_nodes(node_count);
        for &(u, v) in edges {
            graph.add_edge(u, v, EdgeAttributes::default())?;
        }
        Ok(graph)
    }

    fn from_raw_graph(raw: RawGraph) -> Result<MatchGraph> {
        let mut graph = MatchGraph::default();
        graph.graph_attributes = raw.graph_attributes;

        for raw_node in raw.nodes {
            let mut attributes = raw_node.attributes;
            let label = extract_label(&mut attributes);
            graph.add_node(
                raw_node.id,
                NodeAttributes {
                    label,
                    extra: attributes,
                },
            )?;
        }

        for raw_edge in raw.edges {
            let source = graph
                .resolve(&raw_edge.source)
                .with_context(|| "edge source")?;
            let target = graph
                .resolve(&raw_edge.target)
                .with_context(|| "edge target")?;
            let mut attributes = raw_edge.attributes;
            let capacity = extract_capacity(&mut attributes);
            graph.add_edge(
                source,
                target,
                EdgeAttributes {
                    capacity,
                    extra: attributes,
                },
            )?;
        }

        Ok(graph)
    }
}

/// DIMACS ids count from 1.
pub fn from_dimacs_id(id: usize) -> Result<NodeId> {
    if id == 0 {
        bail!("Invalid DIMACS node id 0");
    }
    Ok(id - 1)
}

pub fn to_dimacs_id(node: NodeId) -> usize {
    node + 1
}

fn parse_count(field: Option<&str>, line_no: usize, what: &str) -> Result<usize> {
    let raw = field.ok_or_else(|| anyhow!("Line {}: missing {}", line_no, what))?;
    raw.parse::<usize>()
        .map_err(|_| anyhow!("Line {}: invalid {} '{}'", line_no, what, raw))
}

fn extract_label(attrs: &mut IndexMap<String, serde_json::Value>) -> Option<String> {
    attrs.shift_remove("label").and_then(value_to_string)
}

fn extract_capacity(attrs: &mut IndexMap<String, serde_json::Value>) -> Option<i64> {
    let value = attrs
        .shift_remove("capacity")
        .or_else(|| attrs.shift_remove("weight"))?;
    match value {
        serde_json::Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().map(|f| f.round() as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn value_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(num) => Some(num.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dimacs() -> &'static str {
        "c five cycle\n\
         c with a pendant\n\
         p edge 6 6\n\
         e 1 2\n\
         e 2 3\n\
         e 3 4 7\n\
         e 4 5\n\
         e 5 1\n\
         e 5 6\n"
    }

    fn sample_graph_json() -> String {
        r#"{
            "nodes": [
                {"id": "u", "attributes": {"label": "U"}},
                {"id": "v", "attributes": {"label": "V"}},
                {"id": "w", "attributes": {"label": "W"}}
            ],
            "edges": [
                {"source": "u", "target": "v", "attributes": {"weight": 3}},
                {"source": "v", "target": "w", "attributes": {}}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn load_dimacs_counts_match() {
        let graph = GraphLoader::from_dimacs_str(sample_dimacs()).expect("load graph");
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.has_edge(4, 5));
        assert_eq!(graph.edge_attributes(2).and_then(|a| a.capacity), Some(7));
        assert_eq!(graph.edge_attributes(0).and_then(|a| a.capacity), None);
    }

    #[test]
    fn reader_and_string_agree() {
        let from_reader = GraphLoader::from_dimacs_reader(sample_dimacs().as_bytes()).unwrap();
        let from_str = GraphLoader::from_dimacs_str(sample_dimacs()).unwrap();
        let edges = |g: &MatchGraph| g.edges().map(|(u, v, _)| (u, v)).collect::<Vec<_>>();
        assert_eq!(edges(&from_reader), edges(&from_str));
    }

    #[test]
    fn dimacs_without_problem_line_fails() {
        assert!(GraphLoader::from_dimacs_str("c only comments\n").is_err());
        assert!(GraphLoader::from_dimacs_str("e 1 2\n").is_err());
    }

    #[test]
    fn dimacs_rejects_zero_ids_and_loops() {
        assert!(GraphLoader::from_dimacs_str("p edge 2 1\ne 0 1\n").is_err());
        assert!(GraphLoader::from_dimacs_str("p edge 2 1\ne 2 2\n").is_err());
        assert!(GraphLoader::from_dimacs_str("p edge 2 1\ne 1 3\n").is_err());
    }

    #[test]
    fn load_json_graph_counts_match() {
        let graph = GraphLoader::from_json_str(&sample_graph_json()).expect("load graph");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.resolve("w").unwrap(), 2);
        assert_eq!(graph.graph[petgraph::graph::NodeIndex::new(0)].label.as_deref(), Some("U"));
        assert_eq!(graph.edge_attributes(0).and_then(|a| a.capacity), Some(3));
    }

    #[test]
    fn json_with_unknown_endpoint_fails() {
        let json = r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a", "target": "b"}]}"#;
        assert!(GraphLoader::from_json_str(json).is_err());
    }
}
