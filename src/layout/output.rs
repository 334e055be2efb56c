use super::*;

/// Lays out an `output` component, the structural mirror of an input: data
/// must be processed before it drains out, so processor children and the
/// batching group stack ABOVE the node, while output-kind children hang off
/// to the right as downstream sinks.
pub(super) fn output_to_nodes(node: &TreeNode, ctx: &mut Ctx<'_>) -> NodeChain {
    let vertical_gap = ctx.config.chain.vertical_gap;
    let horizontal_gap = ctx.config.chain.horizontal_gap;

    let mut sinks: Vec<&TreeNode> = Vec::new();
    let mut batch: Option<&TreeNode> = None;
    let mut stages: Vec<&TreeNode> = Vec::new();
    for child in ctx.visible_children(node) {
        match child.kind {
            Some(Kind::Output) => sinks.push(child),
            None if child.is_batch_group() => {
                if batch.is_none() {
                    batch = Some(child);
                }
            }
            None => sinks.push(child),
            Some(_) => stages.push(child),
        }
    }

    let stage_chains: Vec<NodeChain> = stages
        .iter()
        .map(|child| layout_component(child, true, ctx))
        .collect();
    let stage_chain = vertical_chain(stage_chains, true, vertical_gap, ctx.ids);
    let batch_chain = match batch {
        Some(batch) => layout_component(batch, true, ctx),
        None => NodeChain::empty(),
    };

    let mut out = NodeChain::empty();
    let mut cursor = 0.0f32;
    let mut upstream: Vec<String> = Vec::new();
    for chain in [stage_chain, batch_chain] {
        if chain.is_empty() {
            continue;
        }
        let chain = chain.translated(0.0, cursor);
        let heads = chain.inputs.clone();
        let tails = chain.outputs.clone();
        out.width = out.width.max(chain.width);
        cursor += chain.height + vertical_gap;
        out.items.extend(chain.items);
        if out.inputs.is_empty() {
            out.inputs = heads.clone();
        }
        if !upstream.is_empty() && !heads.is_empty() {
            connect(&mut out.items, ctx.ids, &upstream, &heads, Axis::Vertical);
        }
        if !tails.is_empty() {
            upstream = tails;
        }
    }

    let node_y = cursor;
    let (graph_node, node_width, node_height) =
        make_node(ctx.ids.node_id(), Point { x: 0.0, y: node_y }, node, false, ctx);
    let node_id = graph_node.id.clone();
    out.items.push(GraphItem::Node(graph_node));
    if !upstream.is_empty() {
        connect(&mut out.items, ctx.ids, &upstream, &[node_id.clone()], Axis::Vertical);
    }
    if out.inputs.is_empty() {
        out.inputs = vec![node_id.clone()];
    }
    out.outputs = vec![node_id.clone()];
    out.width = out.width.max(node_width);
    out.height = node_y + node_height;

    if !sinks.is_empty() {
        let chains: Vec<NodeChain> = sinks
            .iter()
            .map(|child| layout_component(child, true, ctx))
            .collect();
        let sink_chain = vertical_chain(chains, false, vertical_gap, ctx.ids)
            .translated(node_width + horizontal_gap, node_y);
        let heads = sink_chain.inputs.clone();
        let tails = sink_chain.outputs.clone();
        out.width = out.width.max(node_width + horizontal_gap + sink_chain.width);
        out.height = out.height.max(node_y + sink_chain.height);
        out.items.extend(sink_chain.items);
        if !heads.is_empty() {
            connect(&mut out.items, ctx.ids, &[node_id], &heads, Axis::Horizontal);
        }
        if !tails.is_empty() {
            out.outputs = tails;
        }
    }
    out
}
