use super::*;

/// Lays out kind-less label groups and every kind without a dedicated shape
/// (buffers, caches, rate limits, metrics, unknowns). A kind-less group is a
/// pure pass-through: beyond its title bar it contributes no graph of its
/// own, and its boundary is its children's chain boundary. A kind-less node
/// with no children renders nothing at all.
pub(super) fn general_to_nodes(node: &TreeNode, is_child: bool, ctx: &mut Ctx<'_>) -> NodeChain {
    let vertical_gap = ctx.config.chain.vertical_gap;

    if node.kind.is_none() {
        let chains: Vec<NodeChain> = ctx
            .visible_children(node)
            .into_iter()
            .map(|child| layout_component(child, true, ctx))
            .collect();
        let chain = vertical_chain(chains, true, vertical_gap, ctx.ids);
        if chain.is_empty() {
            return NodeChain::empty();
        }

        let (mut title, title_width, title_height) =
            make_node(ctx.ids.node_id(), Point { x: 0.0, y: 0.0 }, node, is_child, ctx);
        title.width = chain.width.max(title_width);
        let chain = chain.translated(0.0, title_height + ctx.config.chain.title_gap);

        let mut items = vec![GraphItem::Node(title)];
        let width = chain.width.max(title_width);
        let height = title_height + ctx.config.chain.title_gap + chain.height;
        let inputs = chain.inputs.clone();
        let outputs = chain.outputs.clone();
        items.extend(chain.items);
        return NodeChain {
            inputs,
            outputs,
            items,
            width,
            height,
        };
    }

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
    let children = ctx.visible_children(node);
    if !children.is_empty() {
        let chains: Vec<NodeChain> = children
            .iter()
            .map(|child| layout_component(child, true, ctx))
            .collect();
        let chain = vertical_chain(chains, true, vertical_gap, ctx.ids);
        let mut cursor = node_height + vertical_gap;
        stack_below(&mut out, chain, 0.0, &mut cursor, vertical_gap, ctx.ids);
    }
    out
}
