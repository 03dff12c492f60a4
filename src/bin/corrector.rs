//! corrector - typo-correction web service.
//!
//! Builds the metric and the BK-tree index at startup, then serves
//! correction batches over HTTP until terminated.

use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use corrector::cli::Cli;
use corrector::dictionary;
use corrector::metric::{Metric, WeightedLevenshtein};
use corrector::server;
use corrector::tree::BkTree;

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(error) = run(cli).await {
        eprintln!("{}: {error:#}", "Error".red().bold());
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let metric = build_metric(&cli)?;

    let entries = dictionary::load(cli.dictionary())
        .with_context(|| format!("loading dictionary {}", cli.dictionary().display()))?;

    let index = Arc::new(BkTree::build(metric, entries));
    info!(terms = index.len(), "index ready");

    server::serve(index, &cli.address, cli.port)
        .await
        .with_context(|| format!("serving on {}:{}", cli.address, cli.port))?;

    info!("shut down cleanly");
    Ok(())
}

/// Weighted metric when a config was given (its failure is fatal);
/// uniform Levenshtein otherwise, with a notice.
fn build_metric(cli: &Cli) -> anyhow::Result<Metric> {
    match &cli.metric_config {
        Some(path) => {
            info!(path = %path.display(), "parsing metric config");
            let weighted = WeightedLevenshtein::from_path(path)
                .with_context(|| format!("creating weighted metric from {}", path.display()))?;
            Ok(Metric::Weighted(weighted))
        }
        None => {
            warn!("no metric config given; the default Levenshtein metric will be used");
            Ok(Metric::uniform())
        }
    }
}
