//! Asset and identity types for the bonus ledger
//!
//! An asset is issued once by an organization and assigned out to holders
//! as expiring lots. This module defines the issue record persisted per
//! asset and the opaque identity credential used for authorization.

use crate::types::lot::Amount;
use serde::{Deserialize, Serialize};

/// Opaque caller credential
///
/// Stands in for a serialized certificate: the ledger never inspects it
/// beyond byte comparison, which is performed by the injected
/// [`Authorizer`](crate::core::auth::Authorizer), never inside the lot
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Wrap a credential string
    pub fn new(credential: impl Into<String>) -> Self {
        Identity(credential.into())
    }

    /// The raw credential bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The credential as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity(s.to_string())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issue record persisted per asset
///
/// Created by the admin-only issue operation. `balance` is the quantity
/// still available for the owner to assign out; every assign decrements it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Credential of the organization that owns the issued balance
    pub owner: Identity,

    /// Quantity not yet assigned to any holder
    pub balance: Amount,

    /// Asset name, duplicated into the record as in the stored format
    pub name: String,
}

impl AssetRecord {
    /// Create an issue record with the full balance unassigned
    pub fn new(owner: Identity, balance: Amount, name: impl Into<String>) -> Self {
        AssetRecord {
            owner,
            balance,
            name: name.into(),
        }
    }
}
