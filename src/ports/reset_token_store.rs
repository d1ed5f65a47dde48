//! Password-reset token store port.
//!
//! Replaces the platform's old in-process token map with an explicit keyed
//! store. The contract is expiry plus single use, not global scope: a token
//! is valid for one `consume` call within its TTL and worthless afterwards.
//! The reset endpoints themselves belong to the external auth service.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Port for issuing and redeeming single-use reset tokens.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Issue a fresh token for an account, replacing any outstanding one.
    /// Returns the raw token to be delivered out of band.
    async fn issue(&self, account: &str) -> Result<String, DomainError>;

    /// Redeem a token. Returns `true` exactly once per issued token, and
    /// only before the token's expiry; every other call returns `false`.
    async fn consume(&self, account: &str, token: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn reset_token_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ResetTokenStore) {}
    }
}
