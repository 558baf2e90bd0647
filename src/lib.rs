//! Bonus Ledger Library
//! # Overview
//!
//! This library implements an expiring-lot ledger: account balances are
//! ordered lists of dated lots, and a CSV-driven engine issues, assigns,
//! transfers, and queries them with both sync and async processing
//! strategies.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Lot, LotList, Identity, errors)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::lots`] - The pure lot algebra (withdraw, merge, transfer)
//!   - [`core::engine`] - Operation dispatch over store and authorizer
//!   - [`core::store`] - Key-value store seam with the in-memory backend
//!   - [`core::auth`] - Authorization seam
//! - [`io`] - CSV readers, output, and the JSON codec for stored records
//! - [`strategy`] - Pluggable processing pipelines (sync, async batch)
//!
//! # Operations
//!
//! The engine supports four CSV-driven operations:
//!
//! - **Issue**: Create an asset's issue record (admin only)
//! - **Assign**: Move quantity from the issue balance into a holder's lots
//! - **Transfer**: Move eligible lots between holders, earliest expiry
//!   first, splitting at the boundary
//! - **Query**: Report a holder's lot list and total
//!
//! The library additionally exposes `transfer_with_detail` (explicit
//! per-lot transfers, all or nothing) and `query_asset` on the engine.
//!
//! # Lot Eligibility
//!
//! A transfer carries an eligibility threshold: lots expiring before it
//! pass through untouched, lots expiring at or after it are consumed
//! earliest first. A failed operation writes nothing; a transfer always
//! rewrites both accounts together.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Authorizer, ExactMatch, KeyValueStore, LedgerEngine, MemoryStore};
pub use io::write_holdings_csv;
pub use types::{
    Amount, AssetRecord, ExpiryKey, Identity, LedgerError, Lot, LotList, OperationRecord,
    OperationType,
};
