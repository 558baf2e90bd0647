//! Core ledger logic
//!
//! `lots` holds the pure lot algebra; `engine` dispatches operations over
//! the `store` and `auth` seams.

pub mod auth;
pub mod engine;
pub mod lots;
pub mod store;

pub use auth::{Authorizer, ExactMatch};
pub use engine::{EngineConfig, KeyScheme, LedgerEngine};
pub use lots::{merge, transfer, withdraw, TransferOutcome, WithdrawSplit};
pub use store::{KeyValueStore, MemoryStore};
