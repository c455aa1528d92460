//! In-memory credential slot (tests, ephemeral embedders).

use std::sync::{PoisonError, RwLock};

use crate::{CredentialStore, StoredCredential};

/// Credential store that lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full stored record, if any.
    pub fn stored(&self) -> Option<StoredCredential> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, token: &str) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) =
            Some(StoredCredential::new(token));
    }

    fn load(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|c| c.token.clone())
    }

    fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
