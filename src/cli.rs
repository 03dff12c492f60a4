//! CLI argument definitions.

use clap::Parser;
use std::path::{Path, PathBuf};

/// A web server that corrects typos.
#[derive(Debug, Parser)]
#[command(name = "corrector")]
#[command(about = "A web server that corrects typos")]
#[command(version)]
pub struct Cli {
    /// Path to the dictionary file (repeatable; the last one wins)
    #[arg(short = 'd', long, required = true)]
    pub dictionary_path: Vec<PathBuf>,

    /// Path to the metric description file (omit for plain Levenshtein)
    #[arg(short = 'm', long)]
    pub metric_config: Option<PathBuf>,

    /// Host to serve on
    #[arg(short = 'a', long, default_value = "0.0.0.0")]
    pub address: String,

    /// Port to serve on
    #[arg(short = 'p', long, default_value_t = 9000,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,
}

impl Cli {
    /// The effective dictionary path: the last `-d` occurrence.
    pub fn dictionary(&self) -> &Path {
        self.dictionary_path
            .last()
            .expect("clap enforces at least one dictionary path")
    }
}
