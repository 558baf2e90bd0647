//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `lot`: Lot and lot-list types with their structural invariant
//! - `asset`: Asset issue records and caller identities
//! - `operation`: Operation records the engine dispatches on
//! - `error`: Error types for the bonus ledger

pub mod asset;
pub mod error;
pub mod lot;
pub mod operation;

pub use asset::{AssetRecord, Identity};
pub use error::LedgerError;
pub use lot::{Amount, ExpiryKey, Lot, LotList};
pub use operation::{OperationRecord, OperationType};
