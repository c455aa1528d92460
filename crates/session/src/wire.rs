//! Wire models for the auth endpoints.

use serde::{Deserialize, Serialize};

use assetgate_core::{AuthUser, Role, UserId};

/// `GET /auth/check` response.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<WireUser>,
}

/// `POST /auth/<role>/login` and `/auth/<role>/register` success response.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: WireUser,
}

/// Login request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// User record as the backend sends it.
///
/// `role` is optional: login/registration responses do not always carry it,
/// and the portal the user logged in through is authoritative there.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WireUser {
    /// Build the session user with the caller-selected role.
    ///
    /// The portal selection wins; a disagreeing server role is logged so the
    /// divergence is observable rather than silent.
    pub fn into_auth_user(self, selected: Role) -> AuthUser {
        if let Some(server_role) = self.role {
            if server_role != selected {
                tracing::warn!(
                    %server_role,
                    selected_role = %selected,
                    "server-returned role disagrees with portal selection; using selection"
                );
            }
        }

        AuthUser {
            id: self.id,
            email: self.email,
            role: selected,
            extra: self.extra,
        }
    }

    /// Build the session user from the server's own role record (identity
    /// probe). `None` when the server sent no role; the caller treats that
    /// as an unauthenticated result.
    pub fn into_checked_user(self) -> Option<AuthUser> {
        let role = self.role?;
        Some(AuthUser {
            id: self.id,
            email: self.email,
            role,
            extra: self.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_user(role: Option<&str>) -> WireUser {
        let mut value = serde_json::json!({"id": 1, "email": "a@b.com"});
        if let Some(role) = role {
            value["role"] = serde_json::Value::String(role.to_string());
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn caller_selection_wins_over_server_role() {
        let user = wire_user(Some("ADMIN")).into_auth_user(Role::Investor);
        assert_eq!(user.role, Role::Investor);
    }

    #[test]
    fn checked_user_requires_server_role() {
        assert!(wire_user(None).into_checked_user().is_none());
        assert_eq!(
            wire_user(Some("ISSUER")).into_checked_user().unwrap().role,
            Role::Issuer
        );
    }
}
