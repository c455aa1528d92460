//! `assetgate-guard` — route-level gating over Session snapshots.
//!
//! Pure decision layer: no IO, no panics, no session mutation. The guard is
//! re-evaluated on every navigation and on every session change, so a logout
//! while a protected view is mounted redirects immediately.

mod guard;
mod routes;

pub use guard::{evaluate, GuardDecision};
pub use routes::{resolve, Navigation, RouteKind, RouteSpec, LANDING_PATH, ROUTES};
