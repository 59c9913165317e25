use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the restaurant snapshot (a JSON array of restaurants with their visits)
    #[arg(long, env = "STANDINGS_SNAPSHOT", default_value = "restaurants.json")]
    pub snapshot: PathBuf,

    /// Directory to store computed standings
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compute every leaderboard and write the standings manifest (default)
    All,
    /// Compute a single leaderboard, e.g. `overall`, `crust` or `wait-staff`
    Category { name: String },
    /// Compute the same-named dish comparisons
    Dishes,
    /// List every leaderboard position held by one restaurant
    Restaurant { id: String },
}
