//! Key-value store seam
//!
//! The engine persists every record through this trait: issue records and
//! holding lists are opaque byte values under string keys. The in-crate
//! implementation is a HashMap; what matters to the engine is `put_many`,
//! the paired-write primitive the transfer contract requires.

use crate::types::LedgerError;
use std::collections::HashMap;

/// Storage abstraction for ledger records
///
/// Values are already-encoded bytes; the store never interprets them.
/// `put_many` must apply all entries or none: transfer hands it both
/// rewritten accounts in a single call so no one-sided state can persist.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Store every entry, atomically with respect to failure
    ///
    /// Either all entries are applied or the store is unchanged.
    fn put_many(&mut self, entries: Vec<(String, Vec<u8>)>) -> Result<(), LedgerError>;

    /// All entries whose key starts with `prefix`, sorted by key
    ///
    /// Used for the final holdings dump; sorting makes output
    /// deterministic.
    fn entries_with_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;
}

/// HashMap-backed store
///
/// The only backend in this crate. A failed `put_many` cannot occur here,
/// but the engine is written against the trait contract, not against this
/// implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            records: HashMap::new(),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.records.insert(key.to_string(), value);
        Ok(())
    }

    fn put_many(&mut self, entries: Vec<(String, Vec<u8>)>) -> Result<(), LedgerError> {
        for (key, value) in entries {
            self.records.insert(key, value);
        }
        Ok(())
    }

    fn entries_with_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let mut entries: Vec<(String, Vec<u8>)> = self
            .records
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}
