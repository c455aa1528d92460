//! `assetgate-gateway` — single choke point for all backend HTTP calls.
//!
//! Responsible for base-address resolution, bearer-token injection from the
//! credential store, bounded timeouts, and centralized 401 eviction. No
//! retries, no caching: one request per call.

mod base_url;
mod client;
mod error;

pub use base_url::{BaseUrl, PageLocation, API_PREFIX, LOCAL_DEV_BASE};
pub use client::{
    EvictionPolicy, GatewayClient, GatewayClientBuilder, UnauthorizedHook, DEFAULT_TIMEOUT,
};
pub use error::GatewayError;
