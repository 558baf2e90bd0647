//! Processing strategy module for ledger operation processing
//!
//! This module defines the Strategy pattern for complete operation
//! processing pipelines, encompassing CSV parsing, engine dispatch, and
//! holdings output. This allows different processing implementations
//! (synchronous, asynchronous batch) to be selected at runtime.
//!
//! Both strategies apply records to the engine strictly in input order: a
//! transfer rewrites two accounts at once, so reordering records against
//! each other can change the outcome.

use crate::cli::StrategyType;
use crate::core::engine::EngineConfig;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete operation processing pipelines
///
/// Each strategy reads operation records from a CSV file, runs them
/// through a fresh ledger engine built from `config`, and writes the
/// final holdings to `output`.
///
/// # Errors
///
/// Returns an error string only for fatal conditions (file not found,
/// I/O failure, output failure). Individual record errors are logged to
/// stderr and processing continues with the next record; query summaries
/// also go to stderr so stdout stays pure CSV.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from the input file and write holdings to output
    fn process(
        &self,
        input_path: &Path,
        config: &EngineConfig,
        output: &mut dyn Write,
    ) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory for the Strategy pattern: selects and instantiates the
/// implementation at runtime. The batch config applies to the async
/// strategy only and is ignored for sync.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
