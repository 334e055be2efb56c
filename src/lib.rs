#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod graph_dump;
pub mod ids;
pub mod ir;
pub mod layout;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{load_config, Config, LayoutConfig};
pub use ir::{parse_tree, Action, Kind, NodeHooks, NodeHooksHandle, Tree, TreeNode};
pub use layout::{build_graph, Graph, GraphEdge, GraphItem, GraphNode};
