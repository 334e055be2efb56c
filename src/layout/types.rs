use serde::Serialize;

use crate::ir::{Action, Kind, NodeHooksHandle};

/// Side of a node at which an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The matching target side for an edge leaving from `self`.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Axis a chain of components is arranged along. Determines which paired
/// sides an edge stitched along the chain anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub(crate) fn source_side(self) -> Side {
        match self {
            Axis::Horizontal => Side::Right,
            Axis::Vertical => Side::Bottom,
        }
    }

    pub(crate) fn target_side(self) -> Side {
        self.source_side().opposite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Rendering variant of a graph node. Serialized names are the renderer's
/// registered node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeType {
    /// Full component box.
    #[serde(rename = "componentEditMode")]
    Component,
    /// Title bar of a top-level label group.
    #[serde(rename = "titleEditMode")]
    Title,
    /// Reduced-height title bar of a group nested inside another node.
    #[serde(rename = "componentTitleEditMode")]
    CompactTitle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub label: Option<String>,
    pub path: String,
    pub lint_errors: Vec<String>,
    pub actions: Vec<Action>,
    pub has_children: bool,
    pub root_action: bool,
    /// Side an incoming edge attaches to, if any edge targets this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_target: Option<Side>,
    /// Side an outgoing edge leaves from, if any edge starts at this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_source: Option<Side>,
    #[serde(skip)]
    pub hooks: NodeHooksHandle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub class_name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub selectable: bool,
    pub data: NodeData,
    pub position: Point,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
}

/// One produced graph element. Serializes as either a node or an edge
/// object; consumers discriminate by the presence of `source`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GraphItem {
    Node(GraphNode),
    Edge(GraphEdge),
}

impl GraphItem {
    pub fn as_node(&self) -> Option<&GraphNode> {
        match self {
            GraphItem::Node(node) => Some(node),
            GraphItem::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&GraphEdge> {
        match self {
            GraphItem::Node(_) => None,
            GraphItem::Edge(edge) => Some(edge),
        }
    }
}

/// Flat output of one build, ready for a node/edge diagram renderer. The
/// whole set is created fresh by every `build_graph` call; nothing is
/// patched incrementally between builds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub(crate) fn from_items(items: Vec<GraphItem>) -> Self {
        let mut graph = Graph::default();
        for item in items {
            match item {
                GraphItem::Node(node) => graph.nodes.push(node),
                GraphItem::Edge(edge) => graph.edges.push(edge),
            }
        }
        graph
    }

    /// The same build as a single mixed array, nodes before edges.
    pub fn items(&self) -> Vec<GraphItem> {
        let mut items: Vec<GraphItem> =
            self.nodes.iter().cloned().map(GraphItem::Node).collect();
        items.extend(self.edges.iter().cloned().map(GraphItem::Edge));
        items
    }

    /// Lookup seam for decorators that attach live run-state to computed
    /// geometry: by structural path first, display label as fallback.
    pub fn node_by_path(&self, path: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.data.path == path)
    }

    pub fn node_by_path_or_label(&self, key: &str) -> Option<&GraphNode> {
        self.node_by_path(key).or_else(|| {
            self.nodes
                .iter()
                .find(|node| node.data.label.as_deref() == Some(key))
        })
    }
}

/// Working result of laying out one subtree. Coordinates are local to the
/// chain's own top-left origin until a parent translates it into place.
/// `inputs` and `outputs` hold the ids of the boundary nodes that should
/// receive an edge from whatever precedes the chain, or emit one to
/// whatever follows it.
#[derive(Debug, Clone, Default)]
pub struct NodeChain {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub items: Vec<GraphItem>,
    pub width: f32,
    pub height: f32,
}

impl NodeChain {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn translated(mut self, dx: f32, dy: f32) -> Self {
        for item in &mut self.items {
            if let GraphItem::Node(node) = item {
                node.position.x += dx;
                node.position.y += dy;
            }
        }
        self
    }
}
