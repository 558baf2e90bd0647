//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operation records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator
//! - Line numbers are included in error messages for debugging
//!
//! # Memory Efficiency
//!
//! The reader processes one CSV row at a time and never loads the whole
//! file into memory.

use crate::io::csv_format::{convert_op_record, OpCsvRecord};
use crate::types::OperationRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over operation records.
///
/// # Examples
///
/// ```no_run
/// use bonus_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
/// for result in reader {
///     match result {
///         Ok(record) => println!("Processing operation: {:?}", record),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration. The
    /// CSV reader trims whitespace from all fields and allows flexible
    /// field counts for the optional amount/expire columns.
    ///
    /// # Errors
    ///
    /// Returns an error string when the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, String>;

    /// Get the next operation record from the CSV file
    ///
    /// Reads and deserializes the next row, converts it through
    /// csv_format::convert_op_record, and prefixes any error with the
    /// input line number.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<OpCsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                Some(
                    convert_op_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Identity, OperationType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const HEADER: &str = "op,asset,caller,account,amount,expire\n";

    #[test]
    fn test_sync_reader_new_opens_file() {
        let file = create_temp_csv(&format!("{HEADER}issue,points,admin,org,1000,\n"));
        let result = SyncReader::new(file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_valid_issue() {
        let file = create_temp_csv(&format!("{HEADER}issue,points,admin,org,1000,\n"));

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.op, OperationType::Issue);
        assert_eq!(record.asset, "points");
        assert_eq!(record.caller, Identity::new("admin"));
        assert_eq!(record.account, Identity::new("org"));
        assert_eq!(record.amount, Some(1000));
        assert_eq!(record.expire, None);
    }

    #[test]
    fn test_sync_reader_handles_all_operation_types() {
        let content = format!(
            "{HEADER}\
            issue,points,admin,org,1000,\n\
            assign,points,org,alice,30,20170101\n\
            transfer,points,alice,bob,40,20170301\n\
            query,points,alice,alice,,\n"
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].op, OperationType::Issue);
        assert_eq!(records[1].op, OperationType::Assign);
        assert_eq!(records[2].op, OperationType::Transfer);
        assert_eq!(records[3].op, OperationType::Query);
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let content = format!(
            "{HEADER}\
            issue,points,admin,org,1000,\n\
            assign,points,org,alice,bad,20170101\n\
            assign,points,org,alice,30,20170101\n"
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());

        let error = records[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3")); // Line 3 because of header
        assert!(error.contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let content = format!(
            "{HEADER}\
            issue,points,admin,org,1000,\n\
            burn,points,org,alice,30,\n\
            assign,points,org,alice,30,20170101\n"
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let file = create_temp_csv(&format!(
            "{HEADER}  assign  ,  points  ,  org  ,  alice  ,  30  ,  20170101  \n"
        ));

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.asset, "points");
        assert_eq!(record.amount, Some(30));
        assert_eq!(record.expire, Some(20170101));
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv(HEADER);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 0);
    }
}
