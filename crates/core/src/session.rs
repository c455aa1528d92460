//! In-memory session value and its lifecycle states.

use serde::Serialize;

use crate::{AuthUser, Role};

/// Where the session is in its lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Process start, before the startup identity probe has been issued.
    Unknown,
    /// The identity probe is in flight; guarded views show a placeholder.
    Checking,
    /// Token present and the most recent identity check succeeded.
    Authenticated,
    /// No trusted identity.
    Anonymous,
}

/// The authenticated identity held in memory for the lifetime of the process.
///
/// # Invariants
/// - `Authenticated` implies both a token and a user (with a role).
/// - Every other status carries neither.
///
/// Fields are private so the invariant can only be established through the
/// constructors; the session layer is the sole writer of this value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    status: SessionStatus,
    token: Option<String>,
    user: Option<AuthUser>,
}

impl Session {
    /// Initial state, before anything is known about the stored credential.
    pub fn unknown() -> Self {
        Self {
            status: SessionStatus::Unknown,
            token: None,
            user: None,
        }
    }

    /// Identity probe in flight.
    pub fn checking() -> Self {
        Self {
            status: SessionStatus::Checking,
            token: None,
            user: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            token: None,
            user: None,
        }
    }

    pub fn authenticated(token: impl Into<String>, user: AuthUser) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_carries_token_and_user() {
        let session = Session::authenticated("tok", AuthUser::new("1", "a@b.com", Role::Admin));

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[test]
    fn non_authenticated_states_carry_nothing() {
        for session in [Session::unknown(), Session::checking(), Session::anonymous()] {
            assert!(!session.is_authenticated());
            assert!(session.token().is_none());
            assert!(session.user().is_none());
        }
    }
}
