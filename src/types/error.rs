//! Error types for the bonus ledger
//!
//! This module defines all error types that can occur while processing
//! ledger operations. Errors are descriptive and user-friendly for CLI
//! output.
//!
//! # Error Categories
//!
//! - **Invalid-argument errors**: a stored or supplied lot list violating
//!   the ordering/uniqueness invariant
//! - **Balance errors**: insufficient eligible balance, exhausted issue
//!   balance
//! - **Record errors**: missing assets or holdings, duplicate issues
//! - **Authorization errors**: caller identity rejected for the operation
//! - **Storage errors**: undecodable stored bytes, store failures
//! - **Arithmetic errors**: overflow in amount calculations

use crate::types::lot::{Amount, ExpiryKey};
use thiserror::Error;

/// Main error type for the bonus ledger
///
/// Every variant is detected before any state is written, so an error
/// always means the requested operation left the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A lot list is not in ascending expiry order
    ///
    /// Invalid-argument class: the input violates the structural
    /// invariant and no algorithm is run against it.
    #[error("Lot list out of order at position {position}")]
    UnsortedLots {
        /// Index of the first lot whose key is smaller than its predecessor's
        position: usize,
    },

    /// A lot list carries two lots with the same expiry key
    ///
    /// Invalid-argument class, as for `UnsortedLots`.
    #[error("Duplicate expiry key {expires_at} in lot list")]
    DuplicateExpiry {
        /// The repeated expiry key
        expires_at: ExpiryKey,
    },

    /// Eligible lots sum to less than the requested amount
    ///
    /// The withdrawal is rejected as a whole; no partial result exists.
    #[error("Insufficient eligible balance: eligible {eligible}, requested {requested}")]
    InsufficientBalance {
        /// Sum of lots at or past the threshold
        eligible: Amount,
        /// Requested withdrawal amount
        requested: Amount,
    },

    /// Amount arithmetic would overflow
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// No issue record exists for the asset
    #[error("Asset '{asset}' has not been issued")]
    AssetNotFound {
        /// Asset name
        asset: String,
    },

    /// An issue record already exists for the asset
    #[error("Asset '{asset}' is already issued")]
    AssetAlreadyIssued {
        /// Asset name
        asset: String,
    },

    /// The asset name contains the store-key separator
    ///
    /// Holding keys embed the asset name followed by the separator, so a
    /// name containing it would produce ambiguous keys.
    #[error("Asset name '{asset}' contains reserved separator '{separator}'")]
    InvalidAssetName {
        /// Rejected asset name
        asset: String,
        /// Separator the name collides with
        separator: String,
    },

    /// An assign asked for more than the remaining issue balance
    #[error("Issue balance of '{asset}' too low: balance {balance}, requested {requested}")]
    IssueBalanceExceeded {
        /// Asset name
        asset: String,
        /// Remaining unassigned balance
        balance: Amount,
        /// Requested assignment amount
        requested: Amount,
    },

    /// The caller holds no lots of the asset
    #[error("Holder '{holder}' has no lots of asset '{asset}'")]
    HoldingNotFound {
        /// Asset name
        asset: String,
        /// Holder credential
        holder: String,
    },

    /// The caller's credential was rejected for the operation
    #[error("Caller not authorized for {operation}")]
    NotAuthorized {
        /// Operation that was refused
        operation: String,
    },

    /// Stored bytes could not be decoded into a valid record
    ///
    /// Covers both malformed JSON and a decoded lot list that violates
    /// the structural invariant. The engine refuses to run the core on
    /// such state.
    #[error("Failed to decode stored record '{key}': {message}")]
    DecodeError {
        /// Store key whose value failed to decode
        key: String,
        /// Description of the decode failure
        message: String,
    },

    /// The key-value store reported a failure
    #[error("Store error: {message}")]
    StoreError {
        /// Description of the store failure
        message: String,
    },

    /// An operation record was missing a required field
    #[error("{op} operation requires {field}")]
    MissingField {
        /// Operation name
        op: String,
        /// The absent field
        field: String,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an UnsortedLots error
    pub fn unsorted_lots(position: usize) -> Self {
        LedgerError::UnsortedLots { position }
    }

    /// Create a DuplicateExpiry error
    pub fn duplicate_expiry(expires_at: ExpiryKey) -> Self {
        LedgerError::DuplicateExpiry { expires_at }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(eligible: Amount, requested: Amount) -> Self {
        LedgerError::InsufficientBalance {
            eligible,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an AssetNotFound error
    pub fn asset_not_found(asset: &str) -> Self {
        LedgerError::AssetNotFound {
            asset: asset.to_string(),
        }
    }

    /// Create an AssetAlreadyIssued error
    pub fn asset_already_issued(asset: &str) -> Self {
        LedgerError::AssetAlreadyIssued {
            asset: asset.to_string(),
        }
    }

    /// Create an InvalidAssetName error
    pub fn invalid_asset_name(asset: &str, separator: &str) -> Self {
        LedgerError::InvalidAssetName {
            asset: asset.to_string(),
            separator: separator.to_string(),
        }
    }

    /// Create an IssueBalanceExceeded error
    pub fn issue_balance_exceeded(asset: &str, balance: Amount, requested: Amount) -> Self {
        LedgerError::IssueBalanceExceeded {
            asset: asset.to_string(),
            balance,
            requested,
        }
    }

    /// Create a HoldingNotFound error
    pub fn holding_not_found(asset: &str, holder: &str) -> Self {
        LedgerError::HoldingNotFound {
            asset: asset.to_string(),
            holder: holder.to_string(),
        }
    }

    /// Create a NotAuthorized error
    pub fn not_authorized(operation: &str) -> Self {
        LedgerError::NotAuthorized {
            operation: operation.to_string(),
        }
    }

    /// Create a DecodeError
    pub fn decode_error(key: &str, message: impl std::fmt::Display) -> Self {
        LedgerError::DecodeError {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a StoreError
    pub fn store_error(message: impl std::fmt::Display) -> Self {
        LedgerError::StoreError {
            message: message.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str) -> Self {
        LedgerError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
        }
    }
}
