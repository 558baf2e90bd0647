//! Ledger operation engine
//!
//! This module provides the LedgerEngine that dispatches operation records
//! to handlers over an injected key-value store and authorizer.
//!
//! The engine enforces the outer rules around the lot algebra:
//! - Authorization checks before any privileged operation
//! - Fresh decode of stored state, full-replacement writes
//! - Paired writes for every operation touching two records
//! - No write at all once any step of an operation has failed

use crate::core::auth::Authorizer;
use crate::core::lots;
use crate::core::store::KeyValueStore;
use crate::io::codec;
use crate::types::{
    Amount, AssetRecord, ExpiryKey, Identity, LedgerError, Lot, LotList, OperationRecord,
    OperationType,
};

/// Composition of store keys from asset names and holder credentials
///
/// One scheme covers both record kinds; the separator keeps
/// `("ab", "c")` and `("a", "bc")` from colliding.
#[derive(Debug, Clone)]
pub struct KeyScheme {
    /// Prefix for asset issue records
    pub asset_prefix: String,

    /// Prefix for per-holder lot lists
    pub holding_prefix: String,

    /// Separator between asset name and holder credential
    pub separator: String,
}

impl Default for KeyScheme {
    fn default() -> Self {
        KeyScheme {
            asset_prefix: "asset_".to_string(),
            holding_prefix: "holding_".to_string(),
            separator: ":".to_string(),
        }
    }
}

impl KeyScheme {
    /// Key of an asset's issue record
    pub fn asset_key(&self, asset: &str) -> String {
        format!("{}{}", self.asset_prefix, asset)
    }

    /// Key of a holder's lot list for an asset
    pub fn holding_key(&self, asset: &str, holder: &Identity) -> String {
        format!(
            "{}{}{}{}",
            self.holding_prefix, asset, self.separator, holder
        )
    }

    /// Recover `(asset, holder)` from a holding key
    ///
    /// Inverse of [`holding_key`](Self::holding_key), used by the final
    /// holdings dump.
    pub fn parse_holding_key(&self, key: &str) -> Option<(String, String)> {
        let rest = key.strip_prefix(&self.holding_prefix)?;
        let (asset, holder) = rest.split_once(self.separator.as_str())?;
        Some((asset.to_string(), holder.to_string()))
    }
}

/// Engine configuration, built once at startup
///
/// Carried by value into the engine; there is no global state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Credential allowed to issue assets
    pub admin: Identity,

    /// Key composition scheme
    pub keys: KeyScheme,
}

impl EngineConfig {
    /// Configuration with the given admin and the default key scheme
    pub fn new(admin: Identity) -> Self {
        EngineConfig {
            admin,
            keys: KeyScheme::default(),
        }
    }
}

/// Ledger operation engine
///
/// Routes operation records to handlers and owns the store for the run.
/// Every handler decodes fresh state, computes complete replacement
/// records, and only then writes; an error anywhere means nothing was
/// written.
pub struct LedgerEngine<S: KeyValueStore, A: Authorizer> {
    store: S,
    auth: A,
    config: EngineConfig,
}

impl<S: KeyValueStore, A: Authorizer> LedgerEngine<S, A> {
    /// Create an engine over the given store, authorizer, and config
    pub fn new(store: S, auth: A, config: EngineConfig) -> Self {
        LedgerEngine {
            store,
            auth,
            config,
        }
    }

    /// Process a single operation record
    ///
    /// Routes to the handler for the record's operation type. Mutating
    /// operations return `Ok(None)`; a query returns `Ok(Some(summary))`
    /// with a printable result line.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error; the store is unchanged whenever an
    /// error is returned.
    pub fn process(&mut self, record: OperationRecord) -> Result<Option<String>, LedgerError> {
        match record.op {
            OperationType::Issue => {
                let balance = require(record.amount, "issue", "amount")?;
                self.issue(&record.caller, &record.asset, &record.account, balance)?;
                Ok(None)
            }
            OperationType::Assign => {
                let amount = require(record.amount, "assign", "amount")?;
                let expire = require(record.expire, "assign", "expire")?;
                self.assign(&record.caller, &record.asset, &record.account, amount, expire)?;
                Ok(None)
            }
            OperationType::Transfer => {
                let amount = require(record.amount, "transfer", "amount")?;
                let threshold = require(record.expire, "transfer", "expire")?;
                self.transfer(
                    &record.caller,
                    &record.asset,
                    &record.account,
                    threshold,
                    amount,
                )?;
                Ok(None)
            }
            OperationType::Query => {
                let lots = self.query_holder(&record.asset, &record.account)?;
                let total = lots.total()?;
                let body = serde_json::to_string(&lots).map_err(LedgerError::store_error)?;
                Ok(Some(format!(
                    "asset '{}' holder '{}': total {}, lots {}",
                    record.asset, record.account, total, body
                )))
            }
        }
    }

    /// Issue an asset (admin only)
    ///
    /// Writes the issue record `{owner, balance, name}` under the asset
    /// key. At most one issue per asset name.
    pub fn issue(
        &mut self,
        caller: &Identity,
        asset: &str,
        owner: &Identity,
        balance: Amount,
    ) -> Result<(), LedgerError> {
        if !self.auth.allows(caller, &self.config.admin) {
            return Err(LedgerError::not_authorized("issue"));
        }

        // Holding keys are `prefix + asset + separator + holder`; an
        // asset name containing the separator would make them ambiguous.
        // Issue is the only operation that creates assets, so rejecting
        // the name here keeps every later key parseable.
        if asset.contains(self.config.keys.separator.as_str()) {
            return Err(LedgerError::invalid_asset_name(
                asset,
                &self.config.keys.separator,
            ));
        }

        let key = self.config.keys.asset_key(asset);
        if self.store.get(&key)?.is_some() {
            return Err(LedgerError::asset_already_issued(asset));
        }

        let record = AssetRecord::new(owner.clone(), balance, asset);
        self.store.put(&key, codec::encode_asset(&record)?)
    }

    /// Assign lots from the issue balance to a holder (owner only)
    ///
    /// Decrements the asset's unassigned balance and folds a single lot
    /// `{expire, amount}` into the holder's list. Issue record and holding
    /// are written together.
    pub fn assign(
        &mut self,
        caller: &Identity,
        asset: &str,
        holder: &Identity,
        amount: Amount,
        expire: ExpiryKey,
    ) -> Result<(), LedgerError> {
        let asset_key = self.config.keys.asset_key(asset);
        let mut record = self.load_asset(&asset_key, asset)?;

        if !self.auth.allows(caller, &record.owner) {
            return Err(LedgerError::not_authorized("assign"));
        }
        if amount > record.balance {
            return Err(LedgerError::issue_balance_exceeded(
                asset,
                record.balance,
                amount,
            ));
        }
        record.balance -= amount;

        let holding_key = self.config.keys.holding_key(asset, holder);
        let existing = self.load_holding_or_empty(&holding_key)?;
        let incoming = LotList::try_from(vec![Lot::new(expire, amount)])?;
        let merged = lots::merge(&existing, &incoming)?;

        self.store.put_many(vec![
            (asset_key, codec::encode_asset(&record)?),
            (holding_key, codec::encode_lots(&merged)?),
        ])
    }

    /// Transfer eligible lots from the caller to another holder
    ///
    /// Runs the lot transfer on the caller's and recipient's lists and
    /// writes both replacements in one paired call. A recipient with no
    /// existing holding starts from an empty list; a caller with no
    /// holding is an error.
    pub fn transfer(
        &mut self,
        caller: &Identity,
        asset: &str,
        to: &Identity,
        threshold: ExpiryKey,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let source_key = self.config.keys.holding_key(asset, caller);
        let source = self
            .load_holding(&source_key)?
            .ok_or_else(|| LedgerError::holding_not_found(asset, caller.as_str()))?;

        let dest_key = self.config.keys.holding_key(asset, to);

        // A self-transfer shares one record: merging the withdrawn lots
        // into a separately loaded copy would double them. Eligibility is
        // still enforced; the withdrawn lots fold back into the remainder.
        if source_key == dest_key {
            let split = lots::withdraw(&source, threshold, amount)?;
            let merged = lots::merge(&split.remaining, &split.transferred)?;
            return self.store.put(&source_key, codec::encode_lots(&merged)?);
        }

        let destination = self.load_holding_or_empty(&dest_key)?;

        let outcome = lots::transfer(&source, &destination, threshold, amount)?;

        self.store.put_many(vec![
            (source_key, codec::encode_lots(&outcome.new_source)?),
            (dest_key, codec::encode_lots(&outcome.new_destination)?),
        ])
    }

    /// Transfer an explicit list of lots, all or nothing
    ///
    /// Each detail lot is withdrawn with its own expiry as the threshold
    /// and its amount as the quantity, then merged into the recipient.
    /// The whole detail list succeeds or the whole operation aborts; one
    /// paired write happens at the end.
    pub fn transfer_with_detail(
        &mut self,
        caller: &Identity,
        asset: &str,
        to: &Identity,
        details: &LotList,
    ) -> Result<(), LedgerError> {
        let source_key = self.config.keys.holding_key(asset, caller);
        let mut source = self
            .load_holding(&source_key)?
            .ok_or_else(|| LedgerError::holding_not_found(asset, caller.as_str()))?;

        let dest_key = self.config.keys.holding_key(asset, to);

        // Same single-record rule as `transfer`: validate each detail
        // against the live list and fold it straight back in.
        if source_key == dest_key {
            let mut current = source;
            for detail in details {
                let split = lots::withdraw(&current, detail.expires_at, detail.amount)?;
                current = lots::merge(&split.remaining, &split.transferred)?;
            }
            return self.store.put(&source_key, codec::encode_lots(&current)?);
        }

        let mut destination = self.load_holding_or_empty(&dest_key)?;

        for detail in details {
            let outcome =
                lots::transfer(&source, &destination, detail.expires_at, detail.amount)?;
            source = outcome.new_source;
            destination = outcome.new_destination;
        }

        self.store.put_many(vec![
            (source_key, codec::encode_lots(&source)?),
            (dest_key, codec::encode_lots(&destination)?),
        ])
    }

    /// A holder's lot list for an asset
    pub fn query_holder(&self, asset: &str, holder: &Identity) -> Result<LotList, LedgerError> {
        let key = self.config.keys.holding_key(asset, holder);
        self.load_holding(&key)?
            .ok_or_else(|| LedgerError::holding_not_found(asset, holder.as_str()))
    }

    /// An asset's issue record
    pub fn query_asset(&self, asset: &str) -> Result<AssetRecord, LedgerError> {
        let key = self.config.keys.asset_key(asset);
        self.load_asset(&key, asset)
    }

    /// Every holding in the store, sorted by key
    ///
    /// Returns `(asset, holder, lots)` triples for the final output dump.
    pub fn holdings(&self) -> Result<Vec<(String, String, LotList)>, LedgerError> {
        let entries = self
            .store
            .entries_with_prefix(&self.config.keys.holding_prefix)?;
        let mut result = Vec::with_capacity(entries.len());
        for (key, bytes) in entries {
            let (asset, holder) = self
                .config
                .keys
                .parse_holding_key(&key)
                .ok_or_else(|| LedgerError::decode_error(&key, "malformed holding key"))?;
            let lots = codec::decode_lots(&key, &bytes)?;
            result.push((asset, holder, lots));
        }
        Ok(result)
    }

    fn load_asset(&self, key: &str, asset: &str) -> Result<AssetRecord, LedgerError> {
        let bytes = self
            .store
            .get(key)?
            .ok_or_else(|| LedgerError::asset_not_found(asset))?;
        codec::decode_asset(key, &bytes)
    }

    fn load_holding(&self, key: &str) -> Result<Option<LotList>, LedgerError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(codec::decode_lots(key, &bytes)?)),
            None => Ok(None),
        }
    }

    fn load_holding_or_empty(&self, key: &str) -> Result<LotList, LedgerError> {
        Ok(self.load_holding(key)?.unwrap_or_default())
    }
}

/// Reject an operation record missing a required field
fn require<T>(value: Option<T>, op: &str, field: &str) -> Result<T, LedgerError> {
    value.ok_or_else(|| LedgerError::missing_field(op, field))
}
