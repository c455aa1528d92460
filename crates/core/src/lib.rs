//! `assetgate-core` — pure session-domain primitives.
//!
//! This crate contains **pure domain** types (no I/O, no HTTP concerns).

pub mod role;
pub mod session;
pub mod user;

pub use role::{Role, UnknownRole};
pub use session::{Session, SessionStatus};
pub use user::{AuthUser, UserId};
