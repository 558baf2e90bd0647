//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates processing by coordinating between the SyncReader (CSV
//! input) and LedgerEngine (operation dispatch).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Operation processing to `LedgerEngine` (business logic)
//! - CSV output to `csv_format::write_holdings_csv` (format handling)
//!
//! Records stream through one at a time; memory usage is proportional to
//! the stored ledger state, not the input size.

use crate::core::auth::ExactMatch;
use crate::core::engine::{EngineConfig, LedgerEngine};
use crate::core::store::MemoryStore;
use crate::io::csv_format::write_holdings_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// Implements the ProcessingStrategy trait using single-threaded,
/// synchronous processing.
///
/// # Examples
///
/// ```no_run
/// use bonus_ledger::core::engine::EngineConfig;
/// use bonus_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use bonus_ledger::types::Identity;
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let config = EngineConfig::new(Identity::new("admin"));
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("operations.csv"), &config, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process operations from the input file and write holdings to output
    ///
    /// Pipeline:
    /// 1. Creates a SyncReader to stream operation records from the CSV file
    /// 2. Creates a LedgerEngine over a fresh MemoryStore
    /// 3. Applies records to the engine in input order
    /// 4. Collects final holdings from the engine
    /// 5. Writes holdings to output using csv_format::write_holdings_csv
    ///
    /// Fatal errors (file not found, output failure) are returned.
    /// Per-record errors and query summaries go to stderr and processing
    /// continues.
    fn process(
        &self,
        input_path: &Path,
        config: &EngineConfig,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let mut engine = LedgerEngine::new(MemoryStore::new(), ExactMatch, config.clone());

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(record) => match engine.process(record) {
                    Ok(Some(summary)) => eprintln!("{}", summary),
                    Ok(None) => {}
                    Err(e) => eprintln!("Operation error: {}", e),
                },
                Err(e) => eprintln!("CSV parsing error: {}", e),
            }
        }

        let holdings = engine.holdings().map_err(|e| e.to_string())?;
        write_holdings_csv(&holdings, output)?;

        Ok(())
    }
}
