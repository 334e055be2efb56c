use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Label of the synthetic group an input/output gains when its batching
/// policy expands into processors of its own.
pub const BATCHING_PROCESSORS_LABEL: &str = "batching processors";

/// Structural role of a pipeline component. Kind strings this crate does not
/// recognize decode to `Unknown` and still lay out as generic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Input,
    Output,
    Processor,
    Buffer,
    Cache,
    Scanner,
    RateLimit,
    Metric,
    #[serde(other)]
    Unknown,
}

/// One edit operation the console can apply to the component that carries it.
/// The layout engine only threads actions through; it never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub operation: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
}

/// One component or label-group entry of the pipeline tree, addressed by a
/// unique structural `path`. Every optional field defaults to empty; a tree
/// document can omit anything but `path`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeNode {
    pub label: Option<String>,
    pub path: String,
    pub kind: Option<Kind>,
    /// Concrete component name, e.g. `kafka` for an input of kind `input`.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub children: Vec<TreeNode>,
    /// Parallel branches (switch-style fan-out). A node has either
    /// sequential `children` or `grouped_children`, rarely both.
    pub grouped_children: Vec<Vec<TreeNode>>,
    pub actions: Vec<Action>,
    /// Marks an "add new component" placeholder rather than persisted
    /// configuration. Dropped entirely from read-only layouts.
    pub root_action: bool,
    pub lint_errors: Vec<String>,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty() || !self.grouped_children.is_empty()
    }

    /// The synthetic batching-processors group is a kind-less child matched
    /// by its fixed label.
    pub fn is_batch_group(&self) -> bool {
        self.kind.is_none() && self.label.as_deref() == Some(BATCHING_PROCESSORS_LABEL)
    }
}

/// The full input to one layout build: the stream section plus the resource
/// and observability groups, with the console's edit-state flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tree {
    pub stream: Vec<TreeNode>,
    pub resources: Vec<TreeNode>,
    pub observability: Vec<TreeNode>,
    pub read_only: bool,
    pub has_undo: bool,
    pub has_redo: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("failed to read tree document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tree document: {0}")]
    Decode(#[from] serde_json::Error),
}

pub fn parse_tree(input: &str) -> Result<Tree, TreeError> {
    Ok(serde_json::from_str(input)?)
}

/// Callbacks the console supplies per build. The layout engine threads a
/// handle onto every node's data and never invokes any of them itself;
/// downstream UI code calls them in response to user interaction.
pub trait NodeHooks: Send + Sync {
    fn is_read_only(&self) -> bool;
    fn open_action_modal(&self, actions: &[Action]);
    fn headless_action(&self, actions: &[Action]);
}

/// Hooks that do nothing. Used by the CLI, where nodes are not interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl NodeHooks for NoopHooks {
    fn is_read_only(&self) -> bool {
        false
    }

    fn open_action_modal(&self, _actions: &[Action]) {}

    fn headless_action(&self, _actions: &[Action]) {}
}

/// Cheaply cloneable handle to the caller's hooks, carried on every node.
#[derive(Clone)]
pub struct NodeHooksHandle(Arc<dyn NodeHooks>);

impl NodeHooksHandle {
    pub fn new(hooks: impl NodeHooks + 'static) -> Self {
        Self(Arc::new(hooks))
    }

    pub fn noop() -> Self {
        Self::new(NoopHooks)
    }
}

impl std::ops::Deref for NodeHooksHandle {
    type Target = dyn NodeHooks;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl Default for NodeHooksHandle {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for NodeHooksHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeHooksHandle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_tree() {
        let tree = parse_tree(r#"{ "stream": [{ "path": "/in", "kind": "input" }] }"#).unwrap();
        assert_eq!(tree.stream.len(), 1);
        assert_eq!(tree.stream[0].kind, Some(Kind::Input));
        assert!(!tree.read_only);
        assert!(tree.resources.is_empty());
    }

    #[test]
    fn unknown_kind_decodes_to_unknown() {
        let node: TreeNode =
            serde_json::from_str(r#"{ "path": "/x", "kind": "quantum_mixer" }"#).unwrap();
        assert_eq!(node.kind, Some(Kind::Unknown));
    }

    #[test]
    fn rate_limit_round_trips_snake_case() {
        let node: TreeNode =
            serde_json::from_str(r#"{ "path": "/r", "kind": "rate_limit" }"#).unwrap();
        assert_eq!(node.kind, Some(Kind::RateLimit));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"rate_limit\""));
    }

    #[test]
    fn batch_group_is_matched_by_label() {
        let group = TreeNode {
            label: Some(BATCHING_PROCESSORS_LABEL.to_string()),
            path: "/in/batching".to_string(),
            ..TreeNode::default()
        };
        assert!(group.is_batch_group());

        let labeled = TreeNode {
            label: Some("batching processors".to_string()),
            kind: Some(Kind::Processor),
            ..TreeNode::default()
        };
        assert!(
            !labeled.is_batch_group(),
            "kinded nodes are never the synthetic group"
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let node: TreeNode = serde_json::from_str(r#"{ "path": "/p" }"#).unwrap();
        assert!(node.kind.is_none());
        assert!(node.children.is_empty());
        assert!(node.grouped_children.is_empty());
        assert!(node.actions.is_empty());
        assert!(node.lint_errors.is_empty());
        assert!(!node.root_action);
    }
}
