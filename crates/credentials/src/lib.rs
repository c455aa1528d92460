//! `assetgate-credentials` — durable slot for the bearer token.
//!
//! Exactly one token value, outliving a single process run. Persistence is
//! best-effort by contract: a backend that cannot write simply means the
//! session will not survive a restart.

mod file;
mod memory;
mod store;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
pub use store::{CredentialStore, StoredCredential};
