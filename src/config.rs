//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc};
use clap::Parser;

use crate::{
    error::PersistenceResult,
    persistence::{FileStore, KeyValueStore, MemoryStore},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timekeeper")]
#[command(about = "Presentation timer sessions with an operator control surface and a stage display")]
#[command(version)]
pub struct Config {
    /// Port to bind the control surface to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the persisted sessions
    #[arg(short, long, default_value = "./timekeeper-data")]
    pub data_dir: PathBuf,

    /// Keep sessions in memory only; nothing survives a restart
    #[arg(long)]
    pub ephemeral: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Open the key-value store selected by the flags
    pub fn open_storage(&self) -> PersistenceResult<Arc<dyn KeyValueStore>> {
        if self.ephemeral {
            return Ok(Arc::new(MemoryStore::new()));
        }
        Ok(Arc::new(FileStore::open(&self.data_dir)?))
    }
}
