use super::*;

/// Lays out a `processor` (or `scanner`, which shares these semantics
/// exactly). Sequential children chain straight down; grouped children fan
/// out into parallel branches placed side by side beneath the node, and the
/// subtree's outputs become the union of every branch's tail, not a single
/// value.
pub(super) fn processor_to_nodes(node: &TreeNode, ctx: &mut Ctx<'_>) -> NodeChain {
    let vertical_gap = ctx.config.chain.vertical_gap;
    let horizontal_gap = ctx.config.chain.horizontal_gap;

    let (graph_node, node_width, node_height) =
        make_node(ctx.ids.node_id(), Point { x: 0.0, y: 0.0 }, node, false, ctx);
    let node_id = graph_node.id.clone();
    let mut out = NodeChain {
        inputs: vec![node_id.clone()],
        outputs: vec![node_id],
        items: vec![GraphItem::Node(graph_node)],
        width: node_width,
        height: node_height,
    };
    let mut cursor = node_height + vertical_gap;

    let children = ctx.visible_children(node);
    if !children.is_empty() {
        let chains: Vec<NodeChain> = children
            .iter()
            .map(|child| layout_component(child, true, ctx))
            .collect();
        let chain = vertical_chain(chains, true, vertical_gap, ctx.ids);
        stack_below(&mut out, chain, 0.0, &mut cursor, vertical_gap, ctx.ids);
    }

    if !node.grouped_children.is_empty() {
        // Every branch fans out from the same stage: the node itself, or the
        // sequential tail when both child forms co-occur.
        let feeders = out.outputs.clone();
        let mut branch_x = 0.0f32;
        let mut tallest = 0.0f32;
        let mut union: Vec<String> = Vec::new();
        for group in &node.grouped_children {
            let members: Vec<&TreeNode> = group.iter().filter(|child| !ctx.skip(child)).collect();
            let chains: Vec<NodeChain> = members
                .iter()
                .map(|child| layout_component(child, true, ctx))
                .collect();
            let branch = vertical_chain(chains, true, vertical_gap, ctx.ids);
            if branch.is_empty() {
                continue;
            }
            let branch = branch.translated(branch_x, cursor);
            branch_x += branch.width + horizontal_gap;
            tallest = tallest.max(branch.height);
            let heads = branch.inputs.clone();
            let tails = branch.outputs.clone();
            out.items.extend(branch.items);
            if !heads.is_empty() {
                connect(&mut out.items, ctx.ids, &feeders, &heads, Axis::Vertical);
            }
            union.extend(tails);
        }
        if tallest > 0.0 {
            out.width = out.width.max((branch_x - horizontal_gap).max(0.0));
            out.height = cursor + tallest;
        }
        if !union.is_empty() {
            out.outputs = union;
        }
    }
    out
}
