//! Authenticated user identity.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Role;

/// Backend-assigned user identifier.
///
/// The backend is inconsistent about the JSON representation (some endpoints
/// return an integer, others a string), so deserialization accepts both and
/// normalizes to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(i64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}

/// The authenticated identity as held in the session.
///
/// `extra` carries profile fields the core does not interpret (company name,
/// KYC status, wallet address, ...) so views can read them without this crate
/// growing a schema for every portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    #[serde(flatten, default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthUser {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
            extra: serde_json::Map::new(),
        }
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
