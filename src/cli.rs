use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shaft",
    version,
    about = "Roller derby officiating history normalizer and experience ranker"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a directory of histories, score them and write the rankings
    Rank(RankCommand),
    /// Write every loaded game with its weight under one model
    Dump(DumpCommand),
    /// Load a single history document and print what was read
    Inspect(InspectCommand),
}

#[derive(Args)]
pub struct RankCommand {
    pub path: PathBuf,
    /// Date ages are measured against (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub freeze_date: Option<NaiveDate>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Officials listed per role in the printed summary
    #[arg(long, default_value_t = 5)]
    pub top: usize,
    /// Row order of the applicants sheet; counts and levels sort highest first
    #[arg(long, value_enum, default_value = "name")]
    pub sort: SortKey,
}

#[derive(Args)]
pub struct DumpCommand {
    pub path: PathBuf,
    /// Weight model used for the per-game weights; the first configured by default
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub freeze_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct InspectCommand {
    pub file: PathBuf,
    #[arg(long)]
    pub freeze_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortKey {
    Name,
    RefCert,
    NsoCert,
    Games,
    RefGames,
    NsoGames,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
