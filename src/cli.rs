use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Manse lunisolar calendar resolution engine.
#[derive(Parser)]
#[command(
    name = "manse",
    version,
    about = "Resilient lunisolar calendar and solar-term resolution"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve a date between the solar and lunisolar calendars.
    Resolve(ResolveArgs),
    /// List the 24 solar terms of a year.
    Terms(TermsArgs),
    /// Show the solar terms bracketing an instant.
    Next(NextArgs),
}

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Solar (Gregorian) date to lunisolar date.
    SolarToLunar,
    /// Lunisolar date to solar date.
    LunarToSolar,
}

/// Arguments for the `resolve` subcommand.
#[derive(clap::Args)]
pub struct ResolveArgs {
    /// Date to resolve, as YYYY-MM-DD.
    #[arg(short, long)]
    pub date: String,

    /// Conversion direction.
    #[arg(long, value_enum, default_value = "solar-to-lunar")]
    pub direction: Direction,

    /// Address the leap month (lunar-to-solar only).
    #[arg(long)]
    pub leap: bool,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "manse.toml")]
    pub config: PathBuf,

    /// Overall deadline for the resolution, in milliseconds.
    #[arg(long)]
    pub deadline_ms: Option<u64>,
}

/// Arguments for the `terms` subcommand.
#[derive(clap::Args)]
pub struct TermsArgs {
    /// Civil year to list.
    #[arg(short, long)]
    pub year: i32,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "manse.toml")]
    pub config: PathBuf,
}

/// Arguments for the `next` subcommand.
#[derive(clap::Args)]
pub struct NextArgs {
    /// Reference date as YYYY-MM-DD; defaults to the current instant.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Reference time of day as HH:MM (UTC), used with --date.
    #[arg(short, long, default_value = "00:00")]
    pub time: String,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "manse.toml")]
    pub config: PathBuf,
}
