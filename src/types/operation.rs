//! Operation records for the bonus ledger
//!
//! This module defines the operation types the engine dispatches on and the
//! record shape produced by the input readers. Operations mirror the
//! functions a ledger client can invoke: issuing an asset, assigning lots
//! to a holder, transferring lots between holders, and querying balances.

use crate::types::asset::Identity;
use crate::types::lot::{Amount, ExpiryKey};
use serde::{Deserialize, Serialize};

/// Operations supported by the ledger engine
///
/// Issue and assign are creation-side operations gated on the admin and
/// asset owner respectively. Transfer moves lots between two holders and
/// is the only operation that writes two records at once. Query reads a
/// holder's lot list and writes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Create an asset's issue record (admin only)
    Issue,

    /// Move quantity from the issue balance into a holder's lot list
    ///
    /// The new lot is coalesced into the holder's list by expiry key.
    Assign,

    /// Move lots from the caller to another holder
    ///
    /// Only lots at or past the eligibility threshold are consumed,
    /// earliest expiry first. Both accounts are rewritten together.
    Transfer,

    /// Report a holder's lot list and total
    Query,
}

/// A single parsed ledger operation
///
/// The meaning of `account` depends on the operation: the asset owner for
/// issue, the receiving holder for assign and transfer, and the queried
/// holder for query. `amount` and `expire` are absent for query; `expire`
/// is the lot expiry for assign and the eligibility threshold for transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// The operation to perform
    pub op: OperationType,

    /// Asset the operation applies to
    pub asset: String,

    /// Credential of the caller invoking the operation
    pub caller: Identity,

    /// Counterparty account (owner, recipient, or queried holder)
    pub account: Identity,

    /// Quantity for issue/assign/transfer; None for query
    pub amount: Option<Amount>,

    /// Lot expiry (assign) or eligibility threshold (transfer)
    pub expire: Option<ExpiryKey>,
}
