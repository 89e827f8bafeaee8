//! Configuration
//!
//! Settings come from command-line flags, falling back to environment variables (and a
//! `.env` file if present).

use std::{fs, io, path::PathBuf};

use clap::{Args, Parser};
use thiserror::Error;

use crate::{
    fixtures::{self, FixtureError},
    order_log::OrderLog,
    session::{LogFailurePolicy, Session},
};

/// Errors preparing a session from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The menu couldn't be loaded.
    #[error("Failed to load menu: {0}")]
    Menu(#[from] FixtureError),

    /// The order log directory couldn't be created.
    #[error("Failed to create order log directory {}: {source}", path.display())]
    LogDir {
        /// Directory path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Canteen configuration
#[derive(Debug, Parser)]
#[command(name = "canteen", about = "Restaurant ordering counter", long_about = None)]
pub struct Config {
    /// Directory the daily order logs are written to
    #[arg(long, env = "CANTEEN_LOG_DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// YAML menu to use instead of the standard menu
    #[arg(long, env = "CANTEEN_MENU")]
    pub menu: Option<PathBuf>,

    /// What checkout does when an order can't be logged
    #[arg(
        long,
        env = "CANTEEN_ON_LOG_FAILURE",
        value_enum,
        default_value_t = LogFailurePolicy::Proceed
    )]
    pub on_log_failure: LogFailurePolicy,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Build a session from this configuration, creating the log directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu can't be loaded or the log directory can't be created.
    pub fn session(&self) -> Result<Session, ConfigError> {
        let catalog = match &self.menu {
            Some(path) => fixtures::load_menu(path)?,
            None => fixtures::standard_menu()?,
        };

        fs::create_dir_all(&self.log_dir).map_err(|source| ConfigError::LogDir {
            path: self.log_dir.clone(),
            source,
        })?;

        Ok(Session::new(catalog, OrderLog::new(&self.log_dir))
            .with_log_failure_policy(self.on_log_failure))
    }
}
