//! I/O module
//!
//! Handles CSV parsing, persisted-record encoding, and output.
//!
//! # Components
//!
//! - `codec` - JSON encoding/decoding of stored ledger records
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod codec;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_op_record, write_holdings_csv, OpCsvRecord};
pub use sync_reader::SyncReader;
