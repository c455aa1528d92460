//! Backend base-address resolution.
//!
//! The same build must work in local development and when the page is served
//! through a tunnel/proxy under a different host, without a rebuild: local
//! hosts use a fixed development address, anything else derives the backend
//! address from the page's own origin plus the API prefix.

use url::Url;

/// Fixed backend address used when the page is served from a local host.
pub const LOCAL_DEV_BASE: &str = "http://localhost:5000/api";

/// Path prefix the backend mounts its API under.
pub const API_PREFIX: &str = "/api";

/// Where the embedding page is being served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub scheme: String,
    pub host: String,
    /// Only set for non-default ports.
    pub port: Option<u16>,
}

impl PageLocation {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Derive the location from a full page URL.
    ///
    /// `None` for URLs without a host (e.g. `file:` pages); callers fall back
    /// to [`LOCAL_DEV_BASE`] there. `Url::port` already elides scheme-default
    /// ports.
    pub fn from_url(url: &Url) -> Option<Self> {
        url.host_str()
            .map(|host| Self::new(url.scheme(), host, url.port()))
    }

    fn is_local(&self) -> bool {
        self.host == "localhost" || self.host == "127.0.0.1"
    }
}

/// Resolved backend base address (`scheme://host[:port]/api`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Wrap an already-resolved address (tests, explicit configuration).
    /// A trailing slash is stripped so path joins stay predictable.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        while raw.ends_with('/') {
            raw.pop();
        }
        Self(raw)
    }

    /// Resolve the backend address for a page location.
    pub fn resolve(page: &PageLocation) -> Self {
        if page.is_local() {
            return Self(LOCAL_DEV_BASE.to_string());
        }

        let mut base = format!("{}://{}", page.scheme, page.host);
        if let Some(port) = page.port {
            base.push_str(&format!(":{port}"));
        }
        base.push_str(API_PREFIX);
        Self(base)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an absolute API path (`/auth/check`) onto the base.
    pub(crate) fn join(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'), "API paths are absolute");
        format!("{}{}", self.0, path)
    }
}

impl core::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
