//! Configuration management for the feature-gating language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Locating the user and project settings files

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::settings::{self, Settings, PROJECT_SETTINGS_FILE};

/// Command-line arguments for the language server
#[derive(Debug, Parser)]
#[command(name = "kite-gate-ls")]
#[command(about = "Language server that gates editor features by file extension")]
#[command(version)]
pub struct Args {
    /// Extensions to disable before any settings file or client setting applies
    #[arg(
        long = "disable-extension",
        value_name = "EXT",
        help = "File extension to disable (repeatable, e.g. '.py')"
    )]
    pub disabled_extensions: Vec<String>,

    /// Project settings file
    #[arg(long, help = "Path to the project settings file (default: ./.kite.toml)")]
    pub project_config: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Extensions disabled on the command line
    pub cli_disabled: Vec<String>,
    /// User-global settings file
    pub user_settings_path: Option<PathBuf>,
    /// Project settings file
    pub project_settings_path: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let project_settings_path = match args.project_config {
            Some(path) => Some(path),
            None => Some(std::env::current_dir()?.join(PROJECT_SETTINGS_FILE)),
        };

        Ok(Config {
            cli_disabled: args.disabled_extensions,
            user_settings_path: settings::user_settings_path(),
            project_settings_path,
            log_level: args.log_level,
        })
    }

    /// Settings from the command line and settings files, before the client
    /// has been asked.
    pub fn base_settings(&self) -> Settings {
        let cli = if self.cli_disabled.is_empty() {
            Settings::default()
        } else {
            Settings::with_disabled(self.cli_disabled.iter().cloned())
        };
        settings::load_layered(
            cli,
            self.user_settings_path.as_deref(),
            self.project_settings_path.as_deref(),
        )
    }
}
