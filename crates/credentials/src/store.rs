//! Credential store contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted credential record.
///
/// `stored_at` lets embedders show "signed in since" and lets tests assert
/// overwrite semantics; the token itself is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            stored_at: Utc::now(),
        }
    }
}

/// Durable, synchronous persistence for exactly one bearer token.
///
/// # Contract
/// - `save` overwrites; backend failures are swallowed (and logged by the
///   implementation).
/// - `load` must be callable before any network activity and treats
///   unreadable backing data as absent.
/// - `clear` is idempotent.
pub trait CredentialStore: Send + Sync {
    fn save(&self, token: &str);

    fn load(&self) -> Option<String>;

    fn clear(&self);
}
