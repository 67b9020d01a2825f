use std::io;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use self::{
    analyze::AnalyzeArg, cluster::ClusterArg, overview::OverviewArg, stats::StatsArg, top::TopArg,
    years::YearsArg,
};

mod analyze;
mod cluster;
mod overview;
mod stats;
mod top;
mod years;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize a numeric attribute with percentiles and EDF/CDF points
    Stats(#[clap(flatten)] StatsArg),
    /// Rank the most frequent categories of an attribute
    Top(#[clap(flatten)] TopArg),
    /// Cluster records with k-means
    Cluster(#[clap(flatten)] ClusterArg),
    /// Count records per model year
    Years(#[clap(flatten)] YearsArg),
    /// Report collection-wide headline figures
    Overview(#[clap(flatten)] OverviewArg),
    /// Run every analysis and write a combined report
    Analyze(#[clap(flatten)] AnalyzeArg),
}

impl CommandArgs {
    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }
}

fn init_logging(level: Level) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.log_level())?;
    match args.mode {
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::Top(arg) => top::run(&arg)?,
        Mode::Cluster(arg) => cluster::run(&arg)?,
        Mode::Years(arg) => years::run(&arg)?,
        Mode::Overview(arg) => overview::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
    }
    Ok(())
}
