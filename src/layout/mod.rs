mod chain;
mod general;
mod input;
mod output;
mod processor;
pub(crate) mod types;
pub use types::*;

use chain::*;
use general::*;
use input::*;
use output::*;
use processor::*;

use crate::config::LayoutConfig;
use crate::ids::IdGen;
use crate::ir::{Kind, NodeHooksHandle, Tree, TreeNode};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static KIND_CLASSES: Lazy<HashMap<Kind, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (Kind::Input, "input"),
        (Kind::Output, "output"),
        (Kind::Processor, "processor"),
        (Kind::Buffer, "buffer"),
        (Kind::RateLimit, "rate_limit"),
        (Kind::Metric, "metric"),
        (Kind::Cache, "resource"),
        (Kind::Scanner, "resource"),
    ])
});

const FALLBACK_CLASS: &str = "resource";
const TITLE_CLASS: &str = "title";

pub(crate) fn class_for(kind: Option<Kind>) -> String {
    match kind {
        Some(kind) => KIND_CLASSES
            .get(&kind)
            .copied()
            .unwrap_or(FALLBACK_CLASS)
            .to_string(),
        None => TITLE_CLASS.to_string(),
    }
}

/// Per-build state threaded through the recursion. Created fresh by every
/// `build_graph` call; nothing survives across builds.
pub(crate) struct Ctx<'a> {
    pub config: &'a LayoutConfig,
    pub ids: &'a mut IdGen,
    pub read_only: bool,
    pub hooks: NodeHooksHandle,
}

impl Ctx<'_> {
    /// Root-action placeholders are edit-mode affordances; a read-only tree
    /// drops them wherever they occur.
    pub(crate) fn skip(&self, node: &TreeNode) -> bool {
        node.root_action && self.read_only
    }

    pub(crate) fn visible_children<'t>(&self, node: &'t TreeNode) -> Vec<&'t TreeNode> {
        node.children.iter().filter(|child| !self.skip(child)).collect()
    }
}

/// Turns one tree entry into one sized graph node, independent of its
/// neighbours. Kinded entries become full component boxes; kind-less label
/// groups become title bars, compacted when nested inside another node's
/// layout.
pub(crate) fn make_node(
    id: String,
    position: Point,
    source: &TreeNode,
    is_child: bool,
    ctx: &Ctx<'_>,
) -> (GraphNode, f32, f32) {
    let sizes = &ctx.config.node;
    let (node_type, height) = match (source.kind, is_child) {
        (Some(_), _) => (NodeType::Component, sizes.component_height),
        (None, true) => (NodeType::CompactTitle, sizes.compact_title_height),
        (None, false) => (NodeType::Title, sizes.title_height),
    };
    let width = sizes.component_width;
    let node = GraphNode {
        id,
        class_name: class_for(source.kind),
        node_type,
        selectable: source.kind.is_some(),
        data: NodeData {
            kind: source.kind,
            type_name: source.type_name.clone(),
            label: source.label.clone(),
            path: source.path.clone(),
            lint_errors: source.lint_errors.clone(),
            actions: source.actions.clone(),
            has_children: source.has_children(),
            root_action: source.root_action,
            has_target: None,
            has_source: None,
            hooks: ctx.hooks.clone(),
        },
        position,
        width,
        height,
    };
    (node, width, height)
}

/// Dispatches one subtree to the layout function for its kind. Unrecognized
/// kinds fall through to the generic shape, so layout is total over any
/// input tree.
pub(crate) fn layout_component(node: &TreeNode, is_child: bool, ctx: &mut Ctx<'_>) -> NodeChain {
    if ctx.skip(node) {
        return NodeChain::empty();
    }
    match node.kind {
        Some(Kind::Input) => input_to_nodes(node, ctx),
        Some(Kind::Output) => output_to_nodes(node, ctx),
        Some(Kind::Processor) | Some(Kind::Scanner) => processor_to_nodes(node, ctx),
        _ => general_to_nodes(node, is_child, ctx),
    }
}

/// Appends an already-built chain beneath `out`: wires the current outputs
/// into the chain's inputs with vertical anchors, advances the y cursor,
/// and adopts the chain's outputs as the new tail.
pub(crate) fn stack_below(
    out: &mut NodeChain,
    chain: NodeChain,
    x: f32,
    cursor: &mut f32,
    gap: f32,
    ids: &mut IdGen,
) {
    if chain.is_empty() {
        return;
    }
    let chain = chain.translated(x, *cursor);
    let heads = chain.inputs.clone();
    let tails = chain.outputs.clone();
    out.width = out.width.max(x + chain.width);
    out.height = out.height.max(*cursor + chain.height);
    *cursor += chain.height + gap;
    out.items.extend(chain.items);
    if !out.outputs.is_empty() && !heads.is_empty() {
        connect(&mut out.items, ids, &out.outputs, &heads, Axis::Vertical);
    }
    if !tails.is_empty() {
        out.outputs = tails;
    }
}

/// Lays out a whole tree into a flat positioned graph. Phases run in fixed
/// order with a running vertical offset between them: the stream pipeline,
/// then resource groups (placeholders above persisted entries when the tree
/// is editable), then observability groups. Phases never overlap.
pub fn build_graph(tree: &Tree, hooks: NodeHooksHandle, config: &LayoutConfig) -> Graph {
    let mut ids = IdGen::new();
    build_graph_with(tree, hooks, config, &mut ids)
}

/// Same as `build_graph` with a caller-supplied id generator, for
/// deterministic output in tests.
pub fn build_graph_with(
    tree: &Tree,
    hooks: NodeHooksHandle,
    config: &LayoutConfig,
    ids: &mut IdGen,
) -> Graph {
    let mut ctx = Ctx {
        config,
        ids,
        read_only: tree.read_only,
        hooks,
    };
    let mut items: Vec<GraphItem> = Vec::new();
    let mut top = 0.0f32;

    let stream_chains: Vec<NodeChain> = tree
        .stream
        .iter()
        .map(|entry| layout_component(entry, false, &mut ctx))
        .collect();
    let stream = horizontal_chain(
        stream_chains,
        true,
        ctx.config.chain.horizontal_gap,
        ctx.ids,
    );
    top = append_section(&mut items, stream, top, config.section.gap);

    if !tree.read_only {
        let placeholders =
            resources_chain(tree.resources.iter().filter(|entry| entry.root_action), &mut ctx);
        top = append_section(&mut items, placeholders, top, config.section.gap);
    }
    let persisted =
        resources_chain(tree.resources.iter().filter(|entry| !entry.root_action), &mut ctx);
    top = append_section(&mut items, persisted, top, config.section.gap);

    let observability = resources_chain(tree.observability.iter(), &mut ctx);
    append_section(&mut items, observability, top, config.section.gap);

    Graph::from_items(items)
}

fn append_section(items: &mut Vec<GraphItem>, section: NodeChain, top: f32, gap: f32) -> f32 {
    if section.is_empty() {
        return top;
    }
    let height = section.height;
    items.extend(section.translated(0.0, top).items);
    top + height + gap
}
