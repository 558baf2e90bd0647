//! Bonus Ledger CLI
//!
//! Command-line interface for processing expiring-lot ledger operations
//! from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > holdings.csv
//! cargo run -- --strategy sync operations.csv > holdings.csv
//! cargo run -- --strategy async --batch-size 2000 operations.csv > holdings.csv
//! cargo run -- --admin ops-root operations.csv > holdings.csv
//! ```
//!
//! The program reads operation records from the input CSV file, processes
//! them through the ledger engine using the selected processing strategy,
//! and outputs the final holdings to stdout. Query results and per-record
//! errors go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded processing (default)
//! - **async**: Asynchronous batch file reading on a tokio runtime
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use bonus_ledger::cli;
use bonus_ledger::strategy;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let engine_config = args.to_engine_config();

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    // Process operations using the selected strategy
    // Holdings CSV goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &engine_config, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
