use super::*;

pub(crate) fn mark_source(items: &mut [GraphItem], id: &str, side: Side) {
    for item in items {
        if let GraphItem::Node(node) = item
            && node.id == id
        {
            node.data.has_source = Some(side);
        }
    }
}

pub(crate) fn mark_target(items: &mut [GraphItem], id: &str, side: Side) {
    for item in items {
        if let GraphItem::Node(node) = item
            && node.id == id
        {
            node.data.has_target = Some(side);
        }
    }
}

/// Creates one edge per (source, target) pair and sets the paired anchors:
/// each source emits from `axis.source_side()` and each target receives on
/// the opposite side of the same axis.
pub(crate) fn connect(
    items: &mut Vec<GraphItem>,
    ids: &mut IdGen,
    sources: &[String],
    targets: &[String],
    axis: Axis,
) {
    for source in sources {
        for target in targets {
            mark_source(items, source, axis.source_side());
            mark_target(items, target, axis.target_side());
            items.push(GraphItem::Edge(GraphEdge {
                id: ids.edge_id(),
                source: source.clone(),
                target: target.clone(),
                animated: true,
            }));
        }
    }
}

/// Stacks already-laid-out components top to bottom. When `linked`, every
/// output of a component feeds every input of the next (sequential pipeline
/// semantics) and the chain's own boundary is the first component's inputs
/// and the last component's outputs; unlinked components stay independent
/// and the boundary is the concatenation of all of theirs.
pub(crate) fn vertical_chain(
    components: Vec<NodeChain>,
    linked: bool,
    gap: f32,
    ids: &mut IdGen,
) -> NodeChain {
    let mut out = NodeChain::empty();
    let mut cursor = 0.0f32;
    let mut prev_outputs: Vec<String> = Vec::new();
    for component in components {
        if component.is_empty() {
            continue;
        }
        let component = component.translated(0.0, cursor);
        cursor += component.height + gap;
        out.width = out.width.max(component.width);
        let inputs = component.inputs.clone();
        let outputs = component.outputs.clone();
        out.items.extend(component.items);
        if linked {
            if out.inputs.is_empty() {
                out.inputs = inputs;
            }
            if !prev_outputs.is_empty() && !component.inputs.is_empty() {
                connect(&mut out.items, ids, &prev_outputs, &component.inputs, Axis::Vertical);
            }
            if !outputs.is_empty() {
                prev_outputs = outputs;
            }
        } else {
            out.inputs.extend(inputs);
            out.outputs.extend(outputs);
        }
    }
    if linked {
        out.outputs = prev_outputs;
    }
    out.height = (cursor - gap).max(0.0);
    out
}

/// Mirror of `vertical_chain` along the x axis, anchoring stitched edges on
/// Left/Right instead of Top/Bottom.
pub(crate) fn horizontal_chain(
    components: Vec<NodeChain>,
    linked: bool,
    gap: f32,
    ids: &mut IdGen,
) -> NodeChain {
    let mut out = NodeChain::empty();
    let mut cursor = 0.0f32;
    let mut prev_outputs: Vec<String> = Vec::new();
    for component in components {
        if component.is_empty() {
            continue;
        }
        let component = component.translated(cursor, 0.0);
        cursor += component.width + gap;
        out.height = out.height.max(component.height);
        let inputs = component.inputs.clone();
        let outputs = component.outputs.clone();
        out.items.extend(component.items);
        if linked {
            if out.inputs.is_empty() {
                out.inputs = inputs;
            }
            if !prev_outputs.is_empty() && !component.inputs.is_empty() {
                connect(
                    &mut out.items,
                    ids,
                    &prev_outputs,
                    &component.inputs,
                    Axis::Horizontal,
                );
            }
            if !outputs.is_empty() {
                prev_outputs = outputs;
            }
        } else {
            out.inputs.extend(inputs);
            out.outputs.extend(outputs);
        }
    }
    if linked {
        out.outputs = prev_outputs;
    }
    out.width = (cursor - gap).max(0.0);
    out
}

/// Lays out independent top-level groups side by side. Each group renders
/// its own title bar with an unlinked horizontal chain of its children
/// stacked beneath. No edges connect sibling groups; resources do not
/// represent data flow among themselves.
pub(crate) fn resources_chain<'t>(
    entries: impl IntoIterator<Item = &'t TreeNode>,
    ctx: &mut Ctx<'_>,
) -> NodeChain {
    let gap = ctx.config.chain.group_gap;
    let mut out = NodeChain::empty();
    let mut cursor = 0.0f32;
    for entry in entries {
        let group = resource_group(entry, ctx);
        if group.is_empty() {
            continue;
        }
        let group = group.translated(cursor, 0.0);
        cursor += group.width + gap;
        out.height = out.height.max(group.height);
        out.inputs.extend(group.inputs.clone());
        out.outputs.extend(group.outputs.clone());
        out.items.extend(group.items);
    }
    out.width = (cursor - gap).max(0.0);
    out
}

fn resource_group(entry: &TreeNode, ctx: &mut Ctx<'_>) -> NodeChain {
    if ctx.skip(entry) {
        return NodeChain::empty();
    }
    // A kinded entry at the top of a section is a bare component, not a group.
    if entry.kind.is_some() {
        return layout_component(entry, false, ctx);
    }
    let children: Vec<NodeChain> = ctx
        .visible_children(entry)
        .into_iter()
        .map(|child| layout_component(child, true, ctx))
        .collect();
    let row = horizontal_chain(children, false, ctx.config.chain.horizontal_gap, ctx.ids);
    if row.is_empty() {
        // Kind-less entry with nothing under it renders nothing.
        return NodeChain::empty();
    }

    let (mut title, title_width, title_height) =
        make_node(ctx.ids.node_id(), Point { x: 0.0, y: 0.0 }, entry, false, ctx);
    // The title bar spans its group.
    title.width = row.width.max(title_width);
    let row = row.translated(0.0, title_height + ctx.config.chain.title_gap);

    let mut items = vec![GraphItem::Node(title)];
    let width = row.width.max(title_width);
    let height = title_height + ctx.config.chain.title_gap + row.height;
    let inputs = row.inputs.clone();
    let outputs = row.outputs.clone();
    items.extend(row.items);
    NodeChain {
        inputs,
        outputs,
        items,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::NodeHooksHandle;

    fn leaf(path: &str, kind: Kind) -> TreeNode {
        TreeNode {
            path: path.to_string(),
            kind: Some(kind),
            ..TreeNode::default()
        }
    }

    fn single(path: &str, ids: &mut IdGen, config: &LayoutConfig) -> NodeChain {
        let node = leaf(path, Kind::Processor);
        let mut ctx = Ctx {
            config,
            ids,
            read_only: false,
            hooks: NodeHooksHandle::noop(),
        };
        layout_component(&node, true, &mut ctx)
    }

    fn node_count(chain: &NodeChain) -> usize {
        chain.items.iter().filter(|item| item.as_node().is_some()).count()
    }

    fn edge_count(chain: &NodeChain) -> usize {
        chain.items.iter().filter(|item| item.as_edge().is_some()).count()
    }

    #[test]
    fn vertical_chain_stacks_with_gap() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(1);
        let a = single("/a", &mut ids, &config);
        let b = single("/b", &mut ids, &config);
        let chain = vertical_chain(vec![a, b], false, 50.0, &mut ids);
        assert_eq!(node_count(&chain), 2);
        assert_eq!(edge_count(&chain), 0);
        assert_eq!(chain.height, 90.0 + 50.0 + 90.0);
        assert_eq!(chain.width, 220.0);
        // Unlinked: boundary is the concatenation of both components'.
        assert_eq!(chain.inputs.len(), 2);
        assert_eq!(chain.outputs.len(), 2);
    }

    #[test]
    fn linked_vertical_chain_stitches_with_paired_anchors() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(2);
        let a = single("/a", &mut ids, &config);
        let b = single("/b", &mut ids, &config);
        let c = single("/c", &mut ids, &config);
        let chain = vertical_chain(vec![a, b, c], true, 50.0, &mut ids);
        assert_eq!(edge_count(&chain), 2);
        assert_eq!(chain.inputs.len(), 1);
        assert_eq!(chain.outputs.len(), 1);
        for item in &chain.items {
            let Some(edge) = item.as_edge() else { continue };
            let source = chain
                .items
                .iter()
                .filter_map(|item| item.as_node())
                .find(|node| node.id == edge.source)
                .unwrap();
            let target = chain
                .items
                .iter()
                .filter_map(|item| item.as_node())
                .find(|node| node.id == edge.target)
                .unwrap();
            assert_eq!(source.data.has_source, Some(Side::Bottom));
            assert_eq!(target.data.has_target, Some(Side::Top));
            assert!(target.position.y > source.position.y);
        }
    }

    #[test]
    fn horizontal_chain_anchors_left_right() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(3);
        let a = single("/a", &mut ids, &config);
        let b = single("/b", &mut ids, &config);
        let chain = horizontal_chain(vec![a, b], true, 80.0, &mut ids);
        assert_eq!(chain.width, 220.0 + 80.0 + 220.0);
        assert_eq!(chain.height, 90.0);
        let edge = chain.items.iter().find_map(|item| item.as_edge()).unwrap();
        let source = chain
            .items
            .iter()
            .filter_map(|item| item.as_node())
            .find(|node| node.id == edge.source)
            .unwrap();
        let target = chain
            .items
            .iter()
            .filter_map(|item| item.as_node())
            .find(|node| node.id == edge.target)
            .unwrap();
        assert_eq!(source.data.has_source, Some(Side::Right));
        assert_eq!(target.data.has_target, Some(Side::Left));
    }

    #[test]
    fn chains_skip_empty_components() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(4);
        let a = single("/a", &mut ids, &config);
        let chain = vertical_chain(
            vec![NodeChain::empty(), a, NodeChain::empty()],
            true,
            50.0,
            &mut ids,
        );
        assert_eq!(node_count(&chain), 1);
        assert_eq!(chain.height, 90.0);
    }

    #[test]
    fn bounding_box_covers_every_member() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(5);
        let a = single("/a", &mut ids, &config);
        let b = single("/b", &mut ids, &config);
        let chain = horizontal_chain(vec![a, b], false, 80.0, &mut ids);
        for item in &chain.items {
            let Some(node) = item.as_node() else { continue };
            assert!(node.position.x + node.width <= chain.width);
            assert!(node.position.y + node.height <= chain.height);
        }
    }

    #[test]
    fn resources_chain_creates_no_edges() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(6);
        let mut ctx = Ctx {
            config: &config,
            ids: &mut ids,
            read_only: false,
            hooks: NodeHooksHandle::noop(),
        };
        let groups = vec![
            TreeNode {
                label: Some("caches".to_string()),
                path: "/caches".to_string(),
                children: vec![leaf("/caches/0", Kind::Cache), leaf("/caches/1", Kind::Cache)],
                ..TreeNode::default()
            },
            TreeNode {
                label: Some("rate limits".to_string()),
                path: "/rate_limits".to_string(),
                children: vec![leaf("/rate_limits/0", Kind::RateLimit)],
                ..TreeNode::default()
            },
        ];
        let chain = resources_chain(groups.iter(), &mut ctx);
        assert_eq!(edge_count(&chain), 0);
        // Two title bars plus three components.
        assert_eq!(node_count(&chain), 5);
        let titles: Vec<&GraphNode> = chain
            .items
            .iter()
            .filter_map(|item| item.as_node())
            .filter(|node| node.node_type == NodeType::Title)
            .collect();
        assert_eq!(titles.len(), 2);
        // Sibling groups advance left to right.
        assert!(titles[1].position.x > titles[0].position.x);
    }

    #[test]
    fn empty_resource_group_is_elided() {
        let config = LayoutConfig::default();
        let mut ids = IdGen::with_seed(7);
        let mut ctx = Ctx {
            config: &config,
            ids: &mut ids,
            read_only: false,
            hooks: NodeHooksHandle::noop(),
        };
        let group = TreeNode {
            label: Some("empty".to_string()),
            path: "/empty".to_string(),
            ..TreeNode::default()
        };
        let chain = resources_chain(std::iter::once(&group), &mut ctx);
        assert!(chain.is_empty());
    }
}
