//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of operation records from an async source.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - Batch reading so the strategy layer can overlap file I/O with
//!   engine work
//!
//! Parsing and conversion are shared with the sync path through the
//! csv_format module.

use crate::io::csv_format::{convert_op_record, OpCsvRecord};
use crate::types::OperationRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Provides batch reading interface over operation records.
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of operation records
    ///
    /// Reads up to `batch_size` records, converting them through the
    /// shared csv_format conversion. Invalid records are logged to
    /// stderr and skipped.
    ///
    /// Returns an empty vector when the end of the input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<OpCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_op_record(csv_record) {
                    Ok(op_record) => batch.push(op_record),
                    Err(e) => eprintln!("Record conversion error: {}", e),
                },
                Some(Err(e)) => eprintln!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
