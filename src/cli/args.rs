use crate::core::engine::EngineConfig;
use crate::strategy::BatchConfig;
use crate::types::Identity;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Process expiring-lot ledger operations from a CSV batch
#[derive(Parser, Debug)]
#[command(name = "bonus-ledger")]
#[command(about = "Process expiring-lot ledger operations from a CSV batch", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Parsing strategy to use for processing operations
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Parsing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of records read per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records read per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Credential allowed to issue assets
    #[arg(
        long = "admin",
        value_name = "IDENTITY",
        default_value = "admin",
        help = "Credential accepted as the issuing administrator"
    )]
    pub admin: String,
}

/// Available parsing strategies for CSV processing
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses the CLI batch size if provided, validating it through
    /// `BatchConfig::new`, or falls back to the default.
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.batch_size {
            Some(size) => BatchConfig::new(size),
            None => BatchConfig::default(),
        }
    }

    /// Create the engine configuration from CLI arguments
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::new(Identity::new(self.admin.as_str()))
    }
}
