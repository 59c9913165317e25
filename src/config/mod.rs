use crate::config::cli::{Args, Command};
use crate::error::{Result, StandingsError};
use clap::Parser;
use tracing::{info, Level};

pub mod cli;

pub struct Config {
    pub args: Args,
    pub log_level: Level,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let log_level = args
            .log_level
            .parse::<Level>()
            .map_err(|_| StandingsError::Config(format!("invalid log level '{}'", args.log_level)))?;

        Ok(Self { args, log_level })
    }

    pub fn command(&self) -> Command {
        self.args.command.clone().unwrap_or(Command::All)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir {:?} exists", self.args.data_dir);
        Ok(())
    }
}
