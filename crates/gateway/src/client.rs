//! The gateway client: bearer injection, bounded timeout, 401 eviction.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use assetgate_credentials::CredentialStore;

use crate::{BaseUrl, GatewayError};

/// Bound on every request; a hung backend fails as [`GatewayError::Timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Invoked synchronously after the gateway clears the credential store on an
/// evicting 401. Embedders use this to reset session state and navigate to
/// the public landing route.
pub trait UnauthorizedHook: Send + Sync {
    fn on_unauthorized(&self);
}

impl<F: Fn() + Send + Sync> UnauthorizedHook for F {
    fn on_unauthorized(&self) {
        self()
    }
}

/// How a 401 on a specific call is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// 401 means the session is no longer valid: clear the store, fire the
    /// hook, return [`GatewayError::Unauthorized`]. The default.
    Evict,
    /// 401 means the presented credentials were wrong (login/registration);
    /// surface the backend message without touching the session.
    Surface,
}

/// Single choke point for backend HTTP calls.
///
/// Thin per-call wrapper: one request, one response. No retries, no caching,
/// no request coalescing.
pub struct GatewayClient {
    http: reqwest::Client,
    base: BaseUrl,
    store: Arc<dyn CredentialStore>,
    hook: RwLock<Option<Arc<dyn UnauthorizedHook>>>,
}

pub struct GatewayClientBuilder {
    base: BaseUrl,
    store: Arc<dyn CredentialStore>,
    timeout: Duration,
}

impl GatewayClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GatewayError::Build(e.to_string()))?;

        Ok(GatewayClient {
            http,
            base: self.base,
            store: self.store,
            hook: RwLock::new(None),
        })
    }
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GatewayClient {
    pub fn builder(base: BaseUrl, store: Arc<dyn CredentialStore>) -> GatewayClientBuilder {
        GatewayClientBuilder {
            base,
            store,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Register the hook fired after an evicting 401. Replaces any previous
    /// hook; the session layer installs exactly one at construction.
    pub fn set_unauthorized_hook(&self, hook: Arc<dyn UnauthorizedHook>) {
        *self.hook.write().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    pub fn store(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.store)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.request::<(), T>(Method::GET, path, None, EvictionPolicy::Evict)
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), EvictionPolicy::Evict)
            .await
    }

    /// `post` with an explicit 401 interpretation; used by login/registration
    /// calls where a 401 is a credential failure, not session expiry.
    pub async fn post_with_policy<B, T>(
        &self,
        path: &str,
        body: &B,
        policy: EvictionPolicy,
    ) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), policy).await
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        policy: EvictionPolicy,
    ) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let correlation_id = Uuid::now_v7();
        let url = self.base.join(path);

        let mut request = self.http.request(method.clone(), &url);
        // Every outbound request carries the stored token, including the
        // anonymous identity probe (reload-resume).
        if let Some(token) = self.store.load() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%correlation_id, %method, path, "dispatching request");

        let response = request.send().await.map_err(|err| {
            tracing::debug!(%correlation_id, path, error = %err, "transport failure");
            classify_transport(&err)
        })?;

        let status = response.status();
        tracing::debug!(%correlation_id, path, status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            return Err(match policy {
                EvictionPolicy::Evict => {
                    self.evict();
                    GatewayError::Unauthorized
                }
                EvictionPolicy::Surface => GatewayError::Status {
                    status: status.as_u16(),
                    message: read_error_message(response).await,
                },
            });
        }

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: read_error_message(response).await,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }

    /// Centralized 401 handling: runs exactly once per evicting 401, in the
    /// same task that received the response.
    fn evict(&self) {
        self.store.clear();
        let hook = self
            .hook
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(hook) = hook {
            hook.on_unauthorized();
        }
        tracing::info!("credentials evicted after 401");
    }
}

fn classify_transport(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(err.to_string())
    }
}

async fn read_error_message(response: reqwest::Response) -> Option<String> {
    response.json::<ErrorBody>().await.ok().map(|b| b.message)
}
