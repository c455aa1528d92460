//! Session orchestration over the gateway.

use std::sync::{Arc, Weak};

use tokio::sync::watch;

use assetgate_core::{AuthUser, Role, Session, SessionStatus};
use assetgate_credentials::CredentialStore;
use assetgate_gateway::{EvictionPolicy, GatewayClient};

use crate::error::{classify, AuthAttempt, AuthFailure};
use crate::wire::{AuthResponse, CheckResponse, LoginRequest};

const CHECK_PATH: &str = "/auth/check";
const LOGOUT_PATH: &str = "/auth/logout";

struct Inner {
    gateway: Arc<GatewayClient>,
    store: Arc<dyn CredentialStore>,
    sessions: watch::Sender<Session>,
    /// Serializes Session-mutating operations: a slow login response cannot
    /// overwrite a later logout.
    mutate: tokio::sync::Mutex<()>,
}

impl Inner {
    fn publish(&self, session: Session) {
        tracing::debug!(status = ?session.status(), "session transition");
        self.sessions.send_replace(session);
    }
}

/// The only component permitted to mutate Session state.
///
/// Cheap to clone; all clones share the same session value. Reads elsewhere
/// go through [`SessionManager::snapshot`] / [`SessionManager::subscribe`]
/// and are read-only.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    /// Wire the manager to a gateway.
    ///
    /// Installs the gateway's unauthorized hook: any evicting 401, on any
    /// endpoint, resets the session to anonymous in the same task (the
    /// gateway has already cleared the credential store by then).
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        let (sessions, _) = watch::channel(Session::unknown());
        let inner = Arc::new(Inner {
            store: gateway.store(),
            gateway: Arc::clone(&gateway),
            sessions,
            mutate: tokio::sync::Mutex::new(()),
        });

        let weak: Weak<Inner> = Arc::downgrade(&inner);
        gateway.set_unauthorized_hook(Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                tracing::info!("session reset to anonymous after 401");
                inner.publish(Session::anonymous());
            }
        }));

        Self { inner }
    }

    /// Current session value.
    pub fn snapshot(&self) -> Session {
        self.inner.sessions.borrow().clone()
    }

    /// Read-only stream of session changes (guards re-evaluate on each).
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.sessions.subscribe()
    }

    /// The gateway all other API traffic should go through, so it inherits
    /// bearer injection and 401 eviction.
    pub fn gateway(&self) -> &Arc<GatewayClient> {
        &self.inner.gateway
    }

    /// Resolve the stored credential into a session.
    ///
    /// Invoked once at startup and re-invocable at any time. Never fails:
    /// every failure path (network error, explicit `authenticated: false`,
    /// non-2xx, role-less user) resolves to anonymous and clears the store.
    /// Without a stored token this resolves immediately, with no network
    /// call and no transient `Checking` state.
    pub async fn check_auth(&self) -> Session {
        let _guard = self.inner.mutate.lock().await;

        let Some(token) = self.inner.store.load() else {
            let session = Session::anonymous();
            self.inner.publish(session.clone());
            return session;
        };

        // Only drop to a loading state when the UI is not already showing an
        // authenticated view; a manual re-check must not flash a spinner.
        if self.snapshot().status() != SessionStatus::Authenticated {
            self.inner.publish(Session::checking());
        }

        let session = match self.inner.gateway.get::<CheckResponse>(CHECK_PATH).await {
            Ok(check) if check.authenticated => {
                match check.user.and_then(|u| u.into_checked_user()) {
                    Some(user) => Session::authenticated(token, user),
                    None => {
                        tracing::warn!("identity check succeeded without a usable user record");
                        self.inner.store.clear();
                        Session::anonymous()
                    }
                }
            }
            Ok(_) => {
                self.inner.store.clear();
                Session::anonymous()
            }
            Err(err) => {
                // A 401 has already evicted the store via the gateway; every
                // other failure evicts here.
                tracing::debug!(error = %err, "identity probe failed");
                self.inner.store.clear();
                Session::anonymous()
            }
        };

        self.inner.publish(session.clone());
        session
    }

    /// Authenticate against the role-specific login sub-path.
    ///
    /// On success the token is persisted, the session becomes authenticated
    /// and the user is returned. On failure the session is left untouched.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthUser, AuthFailure> {
        let _guard = self.inner.mutate.lock().await;

        let path = format!("/auth/{}/login", role.api_segment());
        let body = LoginRequest { email, password };

        let response: AuthResponse = self
            .inner
            .gateway
            .post_with_policy(&path, &body, EvictionPolicy::Surface)
            .await
            .map_err(|err| classify(err, AuthAttempt::Login))?;

        Ok(self.commit(response, role))
    }

    /// Register against the role-specific registration sub-path.
    ///
    /// `profile` is passed through unchanged except for stripping the `role`
    /// discriminator; field validation belongs to the forms.
    pub async fn register(
        &self,
        mut profile: serde_json::Map<String, serde_json::Value>,
        role: Role,
    ) -> Result<AuthUser, AuthFailure> {
        let _guard = self.inner.mutate.lock().await;

        // The discriminator selects the sub-path; the backend does not take it.
        profile.remove("role");
        let path = format!("/auth/{}/register", role.api_segment());

        let response: AuthResponse = self
            .inner
            .gateway
            .post_with_policy(&path, &profile, EvictionPolicy::Surface)
            .await
            .map_err(|err| classify(err, AuthAttempt::Register))?;

        Ok(self.commit(response, role))
    }

    /// End the session.
    ///
    /// The backend call is best-effort; the local teardown (store cleared,
    /// session anonymous) happens regardless, so "stop trusting this
    /// session" always succeeds offline.
    pub async fn logout(&self) {
        let _guard = self.inner.mutate.lock().await;

        if let Err(err) = self
            .inner
            .gateway
            .post::<_, serde_json::Value>(LOGOUT_PATH, &serde_json::json!({}))
            .await
        {
            tracing::debug!(error = %err, "backend logout failed; clearing local session anyway");
        }

        self.inner.store.clear();
        self.inner.publish(Session::anonymous());
    }

    fn commit(&self, response: AuthResponse, role: Role) -> AuthUser {
        self.inner.store.save(&response.token);
        let user = response.user.into_auth_user(role);
        self.inner
            .publish(Session::authenticated(response.token, user.clone()));
        tracing::info!(role = %role, "session established");
        user
    }
}
