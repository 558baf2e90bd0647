//! Authorization seam
//!
//! The engine asks one question before any privileged operation: does the
//! caller's credential stand for the recorded owner? The answer is an
//! injected predicate; policy never leaks into the lot arithmetic.

use crate::types::Identity;

/// Decides whether a claimed credential matches an owner credential
pub trait Authorizer {
    /// True if `claimed` is accepted as `owner`
    fn allows(&self, claimed: &Identity, owner: &Identity) -> bool;
}

/// Byte-for-byte credential comparison
///
/// The default policy: the caller must present exactly the credential on
/// record. Stand-in for comparing serialized certificates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl Authorizer for ExactMatch {
    fn allows(&self, claimed: &Identity, owner: &Identity) -> bool {
        claimed.as_bytes() == owner.as_bytes()
    }
}
