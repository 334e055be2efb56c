use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed node dimensions. Component boxes share one width; kind-less label
/// groups render as title bars of reduced height.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub component_width: f32,
    pub component_height: f32,
    pub title_height: f32,
    pub compact_title_height: f32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            component_width: 220.0,
            component_height: 90.0,
            title_height: 46.0,
            compact_title_height: 30.0,
        }
    }
}

/// Padding between neighbours inside one chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Gap between stacked components in a vertical chain.
    pub vertical_gap: f32,
    /// Gap between side-by-side components in a horizontal chain.
    pub horizontal_gap: f32,
    /// Gap between sibling resource groups in a resources chain.
    pub group_gap: f32,
    /// Gap between a group's title bar and its first row of children.
    pub title_gap: f32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            vertical_gap: 50.0,
            horizontal_gap: 80.0,
            group_gap: 64.0,
            title_gap: 18.0,
        }
    }
}

/// Vertical spacing between the stream, resources, and observability phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub gap: f32,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self { gap: 140.0 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node: NodeConfig,
    pub chain: ChainConfig,
    pub section: SectionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
}

/// Loads a config override file. Accepts JSON5, so hand-written overrides
/// may carry comments and trailing commas. A missing path yields defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let parsed: Config = json5::from_str(&contents)?;
    Ok(parsed)
}
