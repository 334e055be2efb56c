use super::*;

/// Lays out an `input` component. Upstream sources (input-kind children of a
/// combiner, and unlabeled kind-less children other than the synthetic
/// batching group) fan in from the left; the scanner, the batching group,
/// and the remaining children stack beneath the node in data-flow order, so
/// the subtree's outputs are whatever the last stage emits.
pub(super) fn input_to_nodes(node: &TreeNode, ctx: &mut Ctx<'_>) -> NodeChain {
    let vertical_gap = ctx.config.chain.vertical_gap;
    let horizontal_gap = ctx.config.chain.horizontal_gap;

    let mut sources: Vec<&TreeNode> = Vec::new();
    let mut scanner: Option<&TreeNode> = None;
    let mut batch: Option<&TreeNode> = None;
    let mut stages: Vec<&TreeNode> = Vec::new();
    for child in ctx.visible_children(node) {
        match child.kind {
            Some(Kind::Input) => sources.push(child),
            Some(Kind::Scanner) if scanner.is_none() => scanner = Some(child),
            None if child.is_batch_group() => {
                if batch.is_none() {
                    batch = Some(child);
                }
            }
            None if child.label.is_none() => sources.push(child),
            // Labeled kind-less groups, processor children, and anything
            // else run after ingestion.
            _ => stages.push(child),
        }
    }

    let source_chains: Vec<NodeChain> = sources
        .iter()
        .map(|child| layout_component(child, true, ctx))
        .collect();
    let source_chain = vertical_chain(source_chains, false, vertical_gap, ctx.ids);

    // Shift this node rightward to make room for the feeders on its left.
    let node_x = if source_chain.is_empty() {
        0.0
    } else {
        source_chain.width + horizontal_gap
    };
    let (graph_node, node_width, node_height) =
        make_node(ctx.ids.node_id(), Point { x: node_x, y: 0.0 }, node, false, ctx);
    let node_id = graph_node.id.clone();

    let mut out = NodeChain {
        inputs: vec![node_id.clone()],
        outputs: vec![node_id.clone()],
        width: node_x + node_width,
        height: node_height.max(source_chain.height),
        items: Vec::new(),
    };
    let feeders = source_chain.outputs.clone();
    out.items.extend(source_chain.items);
    out.items.push(GraphItem::Node(graph_node));
    if !feeders.is_empty() {
        connect(&mut out.items, ctx.ids, &feeders, &[node_id], Axis::Horizontal);
    }

    let mut cursor = node_height + vertical_gap;
    if let Some(scanner) = scanner {
        let chain = layout_component(scanner, true, ctx);
        stack_below(&mut out, chain, node_x, &mut cursor, vertical_gap, ctx.ids);
    }
    if let Some(batch) = batch {
        let chain = layout_component(batch, true, ctx);
        stack_below(&mut out, chain, node_x, &mut cursor, vertical_gap, ctx.ids);
    }
    if !stages.is_empty() {
        let chains: Vec<NodeChain> = stages
            .iter()
            .map(|child| layout_component(child, true, ctx))
            .collect();
        let chain = vertical_chain(chains, true, vertical_gap, ctx.ids);
        stack_below(&mut out, chain, node_x, &mut cursor, vertical_gap, ctx.ids);
    }
    out
}
