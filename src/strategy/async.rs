//! Asynchronous batch processing strategy
//!
//! Implementation of the ProcessingStrategy trait that reads the input
//! file asynchronously in batches on a tokio runtime.
//!
//! # Ordering
//!
//! Batching applies to reading only. Records are applied to the engine
//! strictly in input order: a transfer rewrites two accounts together, so
//! reordering records against each other can change which transfers
//! succeed. The async win here is overlapping file I/O with engine work,
//! not parallel state mutation.

use crate::core::auth::ExactMatch;
use crate::core::engine::{EngineConfig, LedgerEngine};
use crate::core::store::MemoryStore;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_holdings_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;

/// Configuration for batch reading
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of records read from the file per batch
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

impl BatchConfig {
    /// Create a BatchConfig with a custom batch size
    ///
    /// A zero batch size falls back to the default with a warning.
    pub fn new(batch_size: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        Self { batch_size }
    }
}

/// Asynchronous batch processing strategy
///
/// Reads operation records in batches via csv-async over tokio file I/O
/// and applies each batch to the engine in input order.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch reading configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process operations from the input file and write holdings to output
    ///
    /// Pipeline:
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Opens the input file with tokio::fs and adapts it for csv-async
    /// 3. Reads records in batches of `batch_size`
    /// 4. Applies each batch to the engine in input order
    /// 5. Writes final holdings to output
    ///
    /// Fatal errors (file not found, runtime creation, output failure)
    /// are returned. Per-record errors and query summaries go to stderr.
    fn process(
        &self,
        input_path: &Path,
        config: &EngineConfig,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let mut engine = LedgerEngine::new(MemoryStore::new(), ExactMatch, config.clone());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for record in batch {
                    match engine.process(record) {
                        Ok(Some(summary)) => eprintln!("{}", summary),
                        Ok(None) => {}
                        Err(e) => eprintln!("Operation error: {}", e),
                    }
                }
            }

            let holdings = engine.holdings().map_err(|e| e.to_string())?;
            write_holdings_csv(&holdings, output)?;

            Ok(())
        })
    }
}
