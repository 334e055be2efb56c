use crate::layout::{Graph, GraphEdge, GraphNode};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable snapshot of one build, in the `{ nodes, edges }` shape a
/// node/edge diagram renderer consumes, with counts up front for quick
/// inspection of large graphs.
#[derive(Debug, Serialize)]
pub struct GraphDump<'a> {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: &'a [GraphNode],
    pub edges: &'a [GraphEdge],
}

impl<'a> GraphDump<'a> {
    pub fn from_graph(graph: &'a Graph) -> Self {
        Self {
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            nodes: &graph.nodes,
            edges: &graph.edges,
        }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// The same build flattened to a single mixed array; edges are
/// discriminated by the presence of `source`.
pub fn items_json(graph: &Graph) -> serde_json::Result<String> {
    serde_json::to_string(&graph.items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Kind, NodeHooksHandle, Tree, TreeNode};
    use crate::layout::build_graph;

    fn sample_graph() -> Graph {
        let tree = Tree {
            stream: vec![
                TreeNode {
                    path: "/in".to_string(),
                    kind: Some(Kind::Input),
                    ..TreeNode::default()
                },
                TreeNode {
                    path: "/out".to_string(),
                    kind: Some(Kind::Output),
                    ..TreeNode::default()
                },
            ],
            ..Tree::default()
        };
        build_graph(&tree, NodeHooksHandle::noop(), &LayoutConfig::default())
    }

    #[test]
    fn dump_counts_match_graph() {
        let graph = sample_graph();
        let dump = GraphDump::from_graph(&graph);
        assert_eq!(dump.node_count, 2);
        assert_eq!(dump.edge_count, 1);
        let json = serde_json::to_string(&dump).unwrap();
        assert!(json.contains("\"className\""));
        assert!(json.contains("\"componentEditMode\""));
    }

    #[test]
    fn write_json_round_trips_through_a_file() {
        let graph = sample_graph();
        let path = std::env::temp_dir().join(format!("pipegraph-dump-{}.json", std::process::id()));
        GraphDump::from_graph(&graph).write_json(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["node_count"], 2);
        assert_eq!(parsed["edge_count"], 1);
        assert_eq!(parsed["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["edges"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn items_json_mixes_nodes_and_edges() {
        let graph = sample_graph();
        let json = items_json(&graph).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 3);
        let edges = items
            .iter()
            .filter(|item| item.get("source").is_some())
            .count();
        assert_eq!(edges, 1);
    }
}
