//! Pure lot algebra: withdraw, merge, transfer
//!
//! These are the ledger's core computations. All three are pure functions
//! over [`LotList`] values: no I/O, no locks, no partial results. The
//! caller supplies consistent snapshots of the lists and owns persistence;
//! an error here means nothing should be written back.
//!
//! # Eligibility
//!
//! A withdrawal carries a threshold key. Lots expiring before the threshold
//! are ineligible and pass through untouched; lots expiring at or after it
//! (`>=`, the threshold itself is eligible) are consumed earliest-expiry
//! first, splitting the boundary lot when it holds more than is needed.
//!
//! # Conservation
//!
//! Every successful operation conserves totals exactly:
//! `remaining + transferred == input` for withdraw, and
//! `merged == destination + incoming` for merge.

use crate::types::error::LedgerError;
use crate::types::lot::{Amount, ExpiryKey, Lot, LotList};

/// Result of a successful withdrawal
///
/// `remaining` is what stays in the source account; `transferred` is the
/// ordered sequence of moved (possibly split) lots. Both satisfy the
/// LotList invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawSplit {
    /// Lots left in the source: the ineligible prefix verbatim, the
    /// reduced boundary lot if one was split, and the untouched tail
    pub remaining: LotList,

    /// Lots moved out, ascending by expiry
    pub transferred: LotList,
}

/// Both sides of a completed transfer
///
/// The caller must persist `new_source` and `new_destination` together or
/// not at all; the computation never implies a one-sided change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Replacement lot list for the source account
    pub new_source: LotList,

    /// Replacement lot list for the destination account
    pub new_destination: LotList,
}

/// Select and split lots to satisfy a withdrawal
///
/// Scans `lots` once in ascending expiry order. Lots expiring before
/// `threshold` are copied verbatim to the head of `remaining` and never
/// inspected for consumption. From the first eligible lot onward, whole
/// lots move to `transferred` while they fit; the lot that would
/// overshoot is split, its reduced remainder staying at the same relative
/// position in `remaining`.
///
/// `amount == 0` is a valid no-op: `remaining` equals the input and
/// `transferred` is empty.
///
/// # Errors
///
/// Returns `InsufficientBalance` when the eligible lots sum to less than
/// `amount`. No output lists are produced in that case.
pub fn withdraw(
    lots: &LotList,
    threshold: ExpiryKey,
    amount: Amount,
) -> Result<WithdrawSplit, LedgerError> {
    if amount == 0 {
        return Ok(WithdrawSplit {
            remaining: lots.clone(),
            transferred: LotList::new(),
        });
    }

    let source = lots.as_slice();
    let mut remaining = Vec::with_capacity(source.len());
    let mut transferred = Vec::new();
    let mut needed = amount;
    let mut idx = 0;

    // Ineligible prefix passes through untouched.
    while idx < source.len() && source[idx].expires_at < threshold {
        remaining.push(source[idx]);
        idx += 1;
    }

    // Consume eligible lots earliest-expiry first.
    while idx < source.len() && needed > 0 {
        let lot = source[idx];
        idx += 1;
        if lot.amount <= needed {
            transferred.push(lot);
            needed -= lot.amount;
        } else {
            // Split: the moved part and the remainder share the key.
            transferred.push(Lot::new(lot.expires_at, needed));
            remaining.push(Lot::new(lot.expires_at, lot.amount - needed));
            needed = 0;
        }
    }

    if needed > 0 {
        return Err(LedgerError::insufficient_balance(
            eligible_sum(source, threshold),
            amount,
        ));
    }

    // Everything past the consumption point is untouched.
    remaining.extend_from_slice(&source[idx..]);

    Ok(WithdrawSplit {
        remaining: LotList::from_sorted_unchecked(remaining),
        transferred: LotList::from_sorted_unchecked(transferred),
    })
}

/// Sum of eligible amounts, for the InsufficientBalance report
///
/// Saturating: only used in an error message, never in ledger arithmetic.
fn eligible_sum(lots: &[Lot], threshold: ExpiryKey) -> Amount {
    lots.iter()
        .filter(|lot| lot.expires_at >= threshold)
        .fold(0u64, |acc, lot| acc.saturating_add(lot.amount))
}

/// Fold a sorted sequence of incoming lots into a destination list
///
/// Maintains a forward-only cursor into the destination: because
/// `incoming` is ascending, no earlier position is ever rescanned. An
/// incoming lot whose key matches a destination lot is coalesced into it
/// by index-based addition; otherwise it is inserted before the first
/// strictly-greater key, or appended when none remains.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if coalescing two lots would exceed
/// `u64::MAX`. The destination is not partially updated in that case.
pub fn merge(destination: &LotList, incoming: &LotList) -> Result<LotList, LedgerError> {
    let mut merged: Vec<Lot> = destination.as_slice().to_vec();
    let mut cursor = 0;

    for lot in incoming {
        let mut placed = false;
        let mut j = cursor;
        while j < merged.len() {
            if merged[j].expires_at == lot.expires_at {
                merged[j].amount = merged[j]
                    .amount
                    .checked_add(lot.amount)
                    .ok_or_else(|| LedgerError::arithmetic_overflow("merge"))?;
                cursor = j + 1;
                placed = true;
                break;
            }
            if merged[j].expires_at > lot.expires_at {
                merged.insert(j, *lot);
                cursor = j + 1;
                placed = true;
                break;
            }
            j += 1;
        }
        if !placed {
            merged.push(*lot);
            cursor = merged.len();
        }
    }

    Ok(LotList::from_sorted_unchecked(merged))
}

/// Move an amount of eligible lots from one account to another
///
/// Composes [`withdraw`] on the source with [`merge`] into the
/// destination. The operation has exactly two outcomes: a
/// [`TransferOutcome`] carrying both replacement lists, or an error with
/// both accounts conceptually untouched. There is no intermediate state.
///
/// # Errors
///
/// Propagates `InsufficientBalance` from the withdrawal and
/// `ArithmeticOverflow` from the merge; in both cases the caller must
/// write nothing back.
pub fn transfer(
    source: &LotList,
    destination: &LotList,
    threshold: ExpiryKey,
    amount: Amount,
) -> Result<TransferOutcome, LedgerError> {
    let WithdrawSplit {
        remaining,
        transferred,
    } = withdraw(source, threshold, amount)?;
    let new_destination = merge(destination, &transferred)?;
    Ok(TransferOutcome {
        new_source: remaining,
        new_destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list(pairs: &[(ExpiryKey, Amount)]) -> LotList {
        LotList::try_from(
            pairs
                .iter()
                .map(|&(e, a)| Lot::new(e, a))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn scenario_lots() -> LotList {
        list(&[(20170101, 30), (20170601, 50), (20171231, 20)])
    }

    #[test]
    fn test_withdraw_scenario_a_splits_boundary_lot() {
        let split = withdraw(&scenario_lots(), 20170301, 40).unwrap();
        assert_eq!(split.transferred, list(&[(20170601, 40)]));
        assert_eq!(
            split.remaining,
            list(&[(20170101, 30), (20170601, 10), (20171231, 20)])
        );
    }

    #[test]
    fn test_withdraw_scenario_b_consumes_whole_lots() {
        let split = withdraw(&scenario_lots(), 20170301, 70).unwrap();
        assert_eq!(split.transferred, list(&[(20170601, 50), (20171231, 20)]));
        assert_eq!(split.remaining, list(&[(20170101, 30)]));
    }

    #[test]
    fn test_withdraw_scenario_c_insufficient_balance() {
        let result = withdraw(&scenario_lots(), 20170301, 71);
        assert_eq!(
            result.unwrap_err(),
            LedgerError::InsufficientBalance {
                eligible: 70,
                requested: 71
            }
        );
    }

    #[test]
    fn test_withdraw_zero_amount_is_noop() {
        let lots = scenario_lots();
        let split = withdraw(&lots, 20170301, 0).unwrap();
        assert_eq!(split.remaining, lots);
        assert!(split.transferred.is_empty());
    }

    #[test]
    fn test_withdraw_threshold_equal_key_is_eligible() {
        // >= tie-break: a lot expiring exactly at the threshold is consumed
        let split = withdraw(&scenario_lots(), 20170601, 50).unwrap();
        assert_eq!(split.transferred, list(&[(20170601, 50)]));
        assert_eq!(split.remaining, list(&[(20170101, 30), (20171231, 20)]));
    }

    #[test]
    fn test_withdraw_threshold_past_all_lots() {
        let result = withdraw(&scenario_lots(), 20180101, 1);
        assert_eq!(
            result.unwrap_err(),
            LedgerError::InsufficientBalance {
                eligible: 0,
                requested: 1
            }
        );
    }

    #[test]
    fn test_withdraw_from_empty_list() {
        let result = withdraw(&LotList::new(), 20170101, 5);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance {
                eligible: 0,
                requested: 5
            })
        ));
    }

    #[test]
    fn test_withdraw_consumes_earliest_eligible_first() {
        let split = withdraw(&list(&[(10, 5), (20, 5), (30, 5)]), 10, 7).unwrap();
        assert_eq!(split.transferred, list(&[(10, 5), (20, 2)]));
        assert_eq!(split.remaining, list(&[(20, 3), (30, 5)]));
    }

    #[test]
    fn test_withdraw_exact_eligible_sum_drains_lots() {
        let split = withdraw(&scenario_lots(), 20170301, 70).unwrap();
        assert_eq!(split.remaining, list(&[(20170101, 30)]));
        assert_eq!(split.transferred.total().unwrap(), 70);
    }

    #[test]
    fn test_withdraw_preserves_zero_amount_lots() {
        // A zero lot is carried into transferred, not pruned
        let split = withdraw(&list(&[(10, 0), (20, 5)]), 5, 3).unwrap();
        assert_eq!(split.transferred, list(&[(10, 0), (20, 3)]));
        assert_eq!(split.remaining, list(&[(20, 2)]));
    }

    #[rstest]
    #[case::split(20170301, 40)]
    #[case::whole_lots(20170301, 70)]
    #[case::tie_break(20170601, 30)]
    #[case::everything_eligible(0, 100)]
    #[case::zero(20170301, 0)]
    fn test_withdraw_conserves_total(#[case] threshold: ExpiryKey, #[case] amount: Amount) {
        let lots = scenario_lots();
        let split = withdraw(&lots, threshold, amount).unwrap();
        assert_eq!(
            split.remaining.total().unwrap() + split.transferred.total().unwrap(),
            lots.total().unwrap()
        );
        assert_eq!(split.transferred.total().unwrap(), amount);
    }

    #[rstest]
    #[case::split(20170301, 40)]
    #[case::whole_lots(20170301, 70)]
    fn test_withdraw_eligibility_properties(#[case] threshold: ExpiryKey, #[case] amount: Amount) {
        let lots = scenario_lots();
        let split = withdraw(&lots, threshold, amount).unwrap();

        // Every transferred lot is at or past the threshold
        assert!(split
            .transferred
            .iter()
            .all(|lot| lot.expires_at >= threshold));

        // Ineligible lots survive byte-for-byte in order
        let ineligible_in: Vec<_> = lots
            .iter()
            .filter(|lot| lot.expires_at < threshold)
            .collect();
        let ineligible_out: Vec<_> = split
            .remaining
            .iter()
            .filter(|lot| lot.expires_at < threshold)
            .collect();
        assert_eq!(ineligible_in, ineligible_out);
    }

    #[test]
    fn test_merge_scenario_d_coalesce_and_append() {
        let dest = list(&[(20170601, 10), (20171231, 20)]);
        let incoming = list(&[(20170601, 40), (20180101, 5)]);
        let merged = merge(&dest, &incoming).unwrap();
        assert_eq!(
            merged,
            list(&[(20170601, 50), (20171231, 20), (20180101, 5)])
        );
    }

    #[test]
    fn test_merge_into_empty_destination() {
        let incoming = list(&[(10, 1), (20, 2)]);
        assert_eq!(merge(&LotList::new(), &incoming).unwrap(), incoming);
    }

    #[test]
    fn test_merge_empty_incoming_is_identity() {
        let dest = scenario_lots();
        assert_eq!(merge(&dest, &LotList::new()).unwrap(), dest);
    }

    #[test]
    fn test_merge_inserts_before_greater_key() {
        let merged = merge(&list(&[(10, 1), (30, 3)]), &list(&[(20, 2)])).unwrap();
        assert_eq!(merged, list(&[(10, 1), (20, 2), (30, 3)]));
    }

    #[test]
    fn test_merge_inserts_at_head() {
        let merged = merge(&list(&[(20, 2)]), &list(&[(10, 1)])).unwrap();
        assert_eq!(merged, list(&[(10, 1), (20, 2)]));
    }

    #[test]
    fn test_merge_interleaved_incoming() {
        let dest = list(&[(10, 1), (30, 3), (50, 5)]);
        let incoming = list(&[(20, 2), (30, 30), (60, 6)]);
        let merged = merge(&dest, &incoming).unwrap();
        assert_eq!(
            merged,
            list(&[(10, 1), (20, 2), (30, 33), (50, 5), (60, 6)])
        );
    }

    #[rstest]
    #[case::disjoint(&[(10, 1), (30, 3)], &[(20, 2), (40, 4)])]
    #[case::all_coalesce(&[(10, 1), (20, 2)], &[(10, 10), (20, 20)])]
    #[case::empty_dest(&[], &[(10, 1)])]
    fn test_merge_conserves_total_sorted_unique(
        #[case] dest: &[(ExpiryKey, Amount)],
        #[case] incoming: &[(ExpiryKey, Amount)],
    ) {
        let dest = list(dest);
        let incoming = list(incoming);
        let merged = merge(&dest, &incoming).unwrap();
        assert_eq!(
            merged.total().unwrap(),
            dest.total().unwrap() + incoming.total().unwrap()
        );
        // Re-validating through the fallible constructor checks
        // sortedness and key uniqueness of the result
        assert!(LotList::try_from(Vec::from(merged)).is_ok());
    }

    #[test]
    fn test_merge_overflow_is_an_error() {
        let dest = list(&[(10, u64::MAX)]);
        let incoming = list(&[(10, 1)]);
        assert!(matches!(
            merge(&dest, &incoming),
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_transfer_moves_between_accounts() {
        let source = scenario_lots();
        let dest = list(&[(20170601, 10), (20171231, 20)]);
        let outcome = transfer(&source, &dest, 20170301, 40).unwrap();
        assert_eq!(
            outcome.new_source,
            list(&[(20170101, 30), (20170601, 10), (20171231, 20)])
        );
        assert_eq!(
            outcome.new_destination,
            list(&[(20170601, 50), (20171231, 20)])
        );
        // Conservation across both accounts
        assert_eq!(
            outcome.new_source.total().unwrap() + outcome.new_destination.total().unwrap(),
            source.total().unwrap() + dest.total().unwrap()
        );
    }

    #[test]
    fn test_transfer_insufficient_balance_rejected_whole() {
        let result = transfer(&scenario_lots(), &LotList::new(), 20170301, 71);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_transfer_zero_amount() {
        let source = scenario_lots();
        let dest = list(&[(1, 1)]);
        let outcome = transfer(&source, &dest, 20170301, 0).unwrap();
        assert_eq!(outcome.new_source, source);
        assert_eq!(outcome.new_destination, dest);
    }
}
