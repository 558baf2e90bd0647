//! CSV format handling for operation records and holdings output
//!
//! This module centralizes all CSV format concerns, providing:
//! - OpCsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Holdings output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Identity, LotList, OperationRecord, OperationType};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// op, asset, caller, account, amount, expire.
/// The amount and expire fields are optional because the query operation
/// carries neither.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OpCsvRecord {
    pub op: String,
    pub asset: String,
    pub caller: String,
    pub account: String,
    pub amount: Option<String>,
    pub expire: Option<String>,
}

/// Convert an OpCsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation string into an OperationType enum
/// - Parses the amount into a u64 and the expire into a u32 (if present)
/// - Validates that amount is present for issue/assign/transfer
/// - Validates that expire is present for assign/transfer
///
/// Query records may carry amount/expire values; they are ignored.
pub fn convert_op_record(csv_record: OpCsvRecord) -> Result<OperationRecord, String> {
    let op = match csv_record.op.to_lowercase().as_str() {
        "issue" => OperationType::Issue,
        "assign" => OperationType::Assign,
        "transfer" => OperationType::Transfer,
        "query" => OperationType::Query,
        _ => {
            return Err(format!(
                "Invalid operation type: '{}' for asset {}",
                csv_record.op, csv_record.asset
            ))
        }
    };

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            match u64::from_str(amount_str.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    return Err(format!(
                        "Invalid amount '{}' for asset {}",
                        amount_str, csv_record.asset
                    ))
                }
            }
        }
        _ => None,
    };

    let expire = match csv_record.expire {
        Some(expire_str) if !expire_str.trim().is_empty() => {
            match u32::from_str(expire_str.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    return Err(format!(
                        "Invalid expire '{}' for asset {}",
                        expire_str, csv_record.asset
                    ))
                }
            }
        }
        _ => None,
    };

    // Validate field presence based on operation type
    match op {
        OperationType::Issue => {
            if amount.is_none() {
                return Err(format!(
                    "Issue operation for asset {} requires an amount",
                    csv_record.asset
                ));
            }
        }
        OperationType::Assign | OperationType::Transfer => {
            if amount.is_none() {
                return Err(format!(
                    "{:?} operation for asset {} requires an amount",
                    op, csv_record.asset
                ));
            }
            if expire.is_none() {
                return Err(format!(
                    "{:?} operation for asset {} requires an expire",
                    op, csv_record.asset
                ));
            }
        }
        OperationType::Query => {
            // Queries reference existing state; any amount/expire
            // provided is ignored rather than rejected
        }
    }

    Ok(OperationRecord {
        op,
        asset: csv_record.asset,
        caller: Identity::new(csv_record.caller),
        account: Identity::new(csv_record.account),
        amount,
        expire,
    })
}

/// Write final holdings to CSV format
///
/// Writes one row per lot with columns: asset, holder, expire, amount.
/// Rows are sorted by (asset, holder, expire) for deterministic output.
pub fn write_holdings_csv(
    holdings: &[(String, String, LotList)],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["asset", "holder", "expire", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Flatten to rows and sort for deterministic output
    let mut rows: Vec<(&str, &str, u32, u64)> = holdings
        .iter()
        .flat_map(|(asset, holder, lots)| {
            lots.iter()
                .map(move |lot| (asset.as_str(), holder.as_str(), lot.expires_at, lot.amount))
        })
        .collect();
    rows.sort();

    for (asset, holder, expire, amount) in rows {
        writer
            .write_record(&[
                asset.to_string(),
                holder.to_string(),
                expire.to_string(),
                amount.to_string(),
            ])
            .map_err(|e| format!("Failed to write holding record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
