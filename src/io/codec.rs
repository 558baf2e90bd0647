//! JSON codec for persisted ledger records
//!
//! Each holding is stored as a JSON array of `{"expire", "amount"}`
//! objects, each issue record as a `{"owner", "balance", "name"}` object.
//! Decoding goes through the validated types, so bytes that parse but
//! violate the lot-list invariant fail here rather than reaching the
//! algorithms. Errors carry the store key for context.

use crate::types::{AssetRecord, LedgerError, LotList};

/// Encode a lot list for storage
pub fn encode_lots(lots: &LotList) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(lots).map_err(LedgerError::store_error)
}

/// Decode a stored lot list
///
/// Validates the lot-list invariant as part of deserialization; `key` is
/// reported in the error for both malformed JSON and invariant
/// violations.
pub fn decode_lots(key: &str, bytes: &[u8]) -> Result<LotList, LedgerError> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::decode_error(key, e))
}

/// Encode an issue record for storage
pub fn encode_asset(record: &AssetRecord) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(record).map_err(LedgerError::store_error)
}

/// Decode a stored issue record
pub fn decode_asset(key: &str, bytes: &[u8]) -> Result<AssetRecord, LedgerError> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::decode_error(key, e))
}
