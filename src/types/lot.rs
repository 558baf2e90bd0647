//! Lot and lot-list types for the bonus ledger
//!
//! A balance in this system is not a single number but an ordered sequence
//! of dated lots: quantities tied to an expiry key. This module defines the
//! `Lot` record and the `LotList` container that enforces the structural
//! invariant every ledger algorithm relies on.

use crate::types::error::LedgerError;
use serde::{Deserialize, Serialize};

/// Expiry key for a lot
///
/// An ordered comparable key, conventionally an integer date such as
/// `20170601`. Lots with a larger key expire later.
pub type ExpiryKey = u32;

/// Lot quantity
///
/// Quantities are non-negative integers; negative amounts are
/// unrepresentable by construction.
pub type Amount = u64;

/// A quantity tied to an expiry key
///
/// The atomic unit the ledger tracks. The serialized field name `expire`
/// matches the persisted record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    /// Expiry key (e.g. integer date)
    #[serde(rename = "expire")]
    pub expires_at: ExpiryKey,

    /// Non-negative quantity held in this lot
    ///
    /// A lot whose amount has been reduced to zero stays in its list;
    /// pruning is a caller policy, never applied here.
    pub amount: Amount,
}

impl Lot {
    /// Create a new lot
    pub fn new(expires_at: ExpiryKey, amount: Amount) -> Self {
        Lot { expires_at, amount }
    }
}

/// An ordered sequence of lots
///
/// Invariant, required on input and maintained by every operation:
/// ascending order by `expires_at`, at most one lot per distinct key.
/// The only way to build a `LotList` from raw lots is the fallible
/// conversion below, so a `LotList` value is always well-formed —
/// including one deserialized from stored bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Lot>", into = "Vec<Lot>")]
pub struct LotList(Vec<Lot>);

impl LotList {
    /// Create an empty lot list
    pub fn new() -> Self {
        LotList(Vec::new())
    }

    /// Number of lots in the list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list contains no lots
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the lots in ascending expiry order
    pub fn iter(&self) -> std::slice::Iter<'_, Lot> {
        self.0.iter()
    }

    /// View the lots as a slice
    pub fn as_slice(&self) -> &[Lot] {
        &self.0
    }

    /// Sum of all lot amounts
    ///
    /// Uses checked addition; a sum exceeding `u64::MAX` reports
    /// `ArithmeticOverflow` rather than wrapping.
    pub fn total(&self) -> Result<Amount, LedgerError> {
        self.0.iter().try_fold(0u64, |acc, lot| {
            acc.checked_add(lot.amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("total"))
        })
    }

    /// Build from already-validated parts
    ///
    /// Internal constructor for the lot algorithms, which maintain the
    /// invariant structurally. Debug builds assert it anyway.
    pub(crate) fn from_sorted_unchecked(lots: Vec<Lot>) -> Self {
        debug_assert!(check_invariant(&lots).is_ok());
        LotList(lots)
    }
}

/// Check the ordering/uniqueness invariant over raw lots
///
/// Returns the `InvalidArgument`-class error describing the first
/// violation: `UnsortedLots` for a key out of order, `DuplicateExpiry`
/// for a repeated key.
fn check_invariant(lots: &[Lot]) -> Result<(), LedgerError> {
    for (i, pair) in lots.windows(2).enumerate() {
        if pair[1].expires_at == pair[0].expires_at {
            return Err(LedgerError::duplicate_expiry(pair[1].expires_at));
        }
        if pair[1].expires_at < pair[0].expires_at {
            return Err(LedgerError::unsorted_lots(i + 1));
        }
    }
    Ok(())
}

impl TryFrom<Vec<Lot>> for LotList {
    type Error = LedgerError;

    fn try_from(lots: Vec<Lot>) -> Result<Self, Self::Error> {
        check_invariant(&lots)?;
        Ok(LotList(lots))
    }
}

impl From<LotList> for Vec<Lot> {
    fn from(list: LotList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a LotList {
    type Item = &'a Lot;
    type IntoIter = std::slice::Iter<'a, Lot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
