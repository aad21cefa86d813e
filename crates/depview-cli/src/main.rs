use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use depview_cli::analyze::{self, AnalyzeError, Overrides};
use depview_cli::golist::GoList;
use depview_cli::render;

#[derive(Parser, Debug)]
#[clap(version, about = "Generates a dependency graph visualization for a Go workspace")]
struct Args {
    /// Root directory of the workspace to analyze
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Comma-separated list of path prefixes to ignore (relative to the root)
    #[arg(long, value_delimiter = ',')]
    ignore: Vec<String>,

    /// Output format: 'html' writes the rendered page, 'json' prints the bundle
    #[arg(long, default_value = "html", value_parser = ["html", "json"])]
    format: String,

    /// Output file for the html format (default: dependency_graph.html in the root)
    #[arg(long)]
    output: Option<String>,

    /// Node position cache file (default: node_positions.json in the root)
    #[arg(long)]
    positions: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    debug!(?args, "parsed arguments");

    let root = args
        .root
        .canonicalize()
        .map_err(|e| format!("Invalid working directory {}: {e}", args.root.display()))?;

    let ignore: Vec<String> = args
        .ignore
        .iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect();

    let overrides = Overrides {
        ignore,
        output: args.output,
        positions: args.positions,
    };
    let settings = analyze::resolve(&root, &overrides)?;

    let data = analyze::analyze(&root, &settings, &GoList)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&data)?),
        "html" => {
            let html = render::render_html(&data)?;
            fs::write(&settings.output, html)
                .map_err(|e| AnalyzeError::WriteOutput(settings.output.clone(), e))?;
            println!(
                "Dependency graph has been generated in {}",
                settings.output.display()
            );
        }
        _ => unreachable!("Invalid format validated by clap"),
    }

    Ok(())
}
