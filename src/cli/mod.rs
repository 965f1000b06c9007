//! CLI module for perpctl
//!
//! clap-based command layer. Running with no subcommand starts the
//! interactive close session.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::Config;
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LoggingConfig};

use commands::close::{CloseArgs, CloseCommand};
use commands::positions::{PositionsArgs, PositionsCommand};
use commands::version::{VersionArgs, VersionCommand};

#[derive(Parser)]
#[command(name = "perpctl")]
#[command(version)]
#[command(about = "Inspect and market-close open Bybit linear perpetual positions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the Bybit testnet environment
    #[arg(long, global = true)]
    pub testnet: bool,

    /// Data directory for session logs (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List open positions once, without prompting
    Positions(PositionsArgs),

    /// Interactively close one, several, or all open positions
    Close(CloseArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);
        data_paths.ensure_directories()?;
        init_logging(LoggingConfig::new(data_paths, self.verbose))?;

        match self.command {
            Some(Commands::Version(args)) => VersionCommand::new(args).execute().await,
            Some(Commands::Positions(args)) => {
                let config = Config::from_env(self.testnet)?;
                PositionsCommand::new(args).execute(config).await
            }
            Some(Commands::Close(args)) => {
                let config = Config::from_env(self.testnet)?;
                CloseCommand::new(args).execute(config).await
            }
            // Bare invocation runs the interactive session
            None => {
                let config = Config::from_env(self.testnet)?;
                CloseCommand::new(CloseArgs {}).execute(config).await
            }
        }
    }
}
