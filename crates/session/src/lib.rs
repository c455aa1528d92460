//! `assetgate-session` — the sole writer of the process-wide Session value.
//!
//! [`SessionManager`] orchestrates login, registration, logout, and the
//! identity check against the gateway, derives the typed [`Session`], and
//! publishes read-only snapshots through a watch channel. Everything else in
//! the system (guards, views) only ever reads.
//!
//! [`Session`]: assetgate_core::Session

mod error;
mod manager;
mod wire;

pub use error::AuthFailure;
pub use manager::SessionManager;
