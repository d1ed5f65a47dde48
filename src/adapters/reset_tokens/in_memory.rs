//! In-memory reset-token store.
//!
//! Keyed by account with an explicit TTL, replacing the old global
//! in-process token map. Only a SHA-256 digest of each token is kept, and
//! digests are compared in constant time. Suitable for a single-server
//! deployment; a multi-server deployment would back the same port with a
//! shared store.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::ResetTokenStore;

/// Default token lifetime: 15 minutes.
pub const DEFAULT_TTL_SECS: u64 = 15 * 60;

/// One outstanding token.
struct TokenEntry {
    /// SHA-256 digest of the raw token.
    digest: [u8; 32],
    /// Unix seconds after which the token is dead.
    expires_at: u64,
}

/// In-memory reset-token store with TTL and single-use semantics.
pub struct InMemoryResetTokenStore {
    ttl_secs: u64,
    entries: RwLock<HashMap<String, TokenEntry>>,
}

impl InMemoryResetTokenStore {
    /// Create a store with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_SECS)
    }

    /// Create a store with a custom TTL in seconds.
    pub fn with_ttl(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn digest(token: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.finalize().into()
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

impl Default for InMemoryResetTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResetTokenStore for InMemoryResetTokenStore {
    async fn issue(&self, account: &str) -> Result<String, DomainError> {
        let token = Uuid::new_v4().simple().to_string();
        let entry = TokenEntry {
            digest: Self::digest(&token),
            expires_at: Self::now_secs() + self.ttl_secs,
        };

        // A fresh issue invalidates any token still outstanding.
        self.entries
            .write()
            .await
            .insert(account.to_string(), entry);

        Ok(token)
    }

    async fn consume(&self, account: &str, token: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.get(account) else {
            return Ok(false);
        };
        let expires_at = entry.expires_at;
        let expected = entry.digest;

        if expires_at <= Self::now_secs() {
            entries.remove(account);
            return Ok(false);
        }

        let offered = Self::digest(token);
        if expected.ct_eq(&offered).unwrap_u8() != 1 {
            // Wrong token does not burn the outstanding one.
            return Ok(false);
        }

        entries.remove(account);
        Ok(true)
    }
}
