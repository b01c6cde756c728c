//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

use crate::plan::SearchLimits;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Household file (TOML, or JSON with a `.json` extension).
    #[clap(long, conflicts_with = "preset")]
    pub household: Option<PathBuf>,

    /// Built-in household preset, used when no file is given.
    #[clap(long, default_value = "demo")]
    pub preset: String,

    /// Write the hourly plan as CSV.
    #[clap(long)]
    pub csv_out: Option<PathBuf>,

    /// Write the plan document as JSON.
    #[clap(long)]
    pub json_out: Option<PathBuf>,

    /// Wall-clock search budget in milliseconds, overrides the household file.
    #[clap(long)]
    pub deadline_ms: Option<u64>,

    /// Maximum number of search nodes, overrides the household file.
    #[clap(long)]
    pub node_budget: Option<u64>,

    /// Search worker threads, overrides the household file.
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Serve the plan over HTTP after planning.
    #[cfg(feature = "api")]
    #[clap(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[clap(long, default_value = "3000")]
    pub port: u16,
}

impl Args {
    /// Log level selected by the `-v` count.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Applies the command-line overrides on top of `limits`.
    pub fn apply_limits(&self, mut limits: SearchLimits) -> SearchLimits {
        if let Some(ms) = self.deadline_ms {
            limits = limits.with_deadline(Duration::from_millis(ms));
        }
        if let Some(budget) = self.node_budget {
            limits = limits.with_node_budget(budget);
        }
        if let Some(workers) = self.workers {
            limits = limits.with_workers(usize::try_from(workers).unwrap_or(usize::MAX));
        }
        limits
    }
}
