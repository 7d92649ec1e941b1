use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use edmatch::{GraphLoader, GraphWriter, MatcherConfig, MaximumMatching, OptimaTable, OptimumCheck};

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

struct Args {
    graph: PathBuf,
    optima: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let graph = args
        .next()
        .context("Wrong number of arguments. Usage: edmatch <input_graph> [optima_file]")?;
    let optima = args.next().map(PathBuf::from);
    if let Some(extra) = args.next() {
        anyhow::bail!("Unexpected extra argument: {extra}");
    }
    Ok(Args {
        graph: PathBuf::from(graph),
        optima,
    })
}

fn main() -> Result<()> {
    init_logging();
    let args = parse_args()?;

    let graph = GraphLoader::from_path(&args.graph)
        .with_context(|| format!("load input graph {:?}", args.graph))?;
    info!(
        "Graph {:?}: nodes {}, edges {}",
        graph_name(&args.graph),
        graph.node_count(),
        graph.edge_count()
    );

    let summary = MaximumMatching::new(MatcherConfig::default())
        .compute(&graph)
        .with_context(|| format!("compute maximum matching for {:?}", args.graph))?;
    info!(
        "Matching size {} in {:?} (augmentations {}, shrinks {}, scans {})",
        summary.size(),
        summary.duration,
        summary.stats.augmentations,
        summary.stats.shrinks,
        summary.stats.scans
    );

    GraphWriter::write_dimacs(&summary.matching, io::stdout().lock())
        .context("write matching to stdout")?;

    if let Some(optima_path) = &args.optima {
        report_optimum(optima_path, &args.graph, summary.size())?;
    }
    Ok(())
}

fn report_optimum(optima_path: &Path, graph_path: &Path, found: usize) -> Result<()> {
    let table = OptimaTable::from_path(optima_path)?;
    let name = graph_name(graph_path);
    match table.check(&name, found) {
        Some(OptimumCheck::Optimal) => info!("{}: {}", name, OptimumCheck::Optimal),
        Some(check @ OptimumCheck::Suboptimal { .. }) => info!("{}: {}", name, check),
        Some(check @ OptimumCheck::TooLarge { .. }) => warn!("{}: {}", name, check),
        None => warn!("Graph {} not listed in {:?}", name, optima_path),
    }
    Ok(())
}

fn graph_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_else(|| OsStr::new("<unknown>"))
        .to_string_lossy()
        .into_owned()
}
