use crate::config::load_config;
use crate::graph_dump::{items_json, GraphDump};
use crate::ir::{parse_tree, NodeHooksHandle};
use crate::layout::build_graph;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "pipegraph",
    version,
    about = "Lay out a pipeline tree as a positioned node/edge graph"
)]
pub struct Args {
    /// Input tree file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config override file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Emit a single mixed node/edge array instead of the {nodes, edges} pair
    #[arg(long = "items")]
    pub items: bool,

    /// Lay out read-only regardless of the tree's own flag
    #[arg(long = "readOnly")]
    pub read_only: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let mut tree = parse_tree(&input)?;
    if args.read_only {
        tree.read_only = true;
    }

    let graph = build_graph(&tree, NodeHooksHandle::noop(), &config.layout);
    let json = if args.items {
        items_json(&graph)?
    } else {
        serde_json::to_string_pretty(&GraphDump::from_graph(&graph))?
    };
    write_output(&json, args.output.as_deref())?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
