//! The closed role set of the platform.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Portal role.
///
/// The platform has exactly three portals; there is no open-ended role
/// vocabulary at this layer. A session's role, once set, is immutable for the
/// session's lifetime — changing roles requires a fresh login.
///
/// Serialized uppercase (`"ADMIN"`, `"ISSUER"`, `"INVESTOR"`) to match the
/// backend's wire casing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Issuer,
    Investor,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Issuer, Role::Investor];

    /// Sub-path segment used by the login/registration endpoints
    /// (`/auth/<segment>/login`).
    pub fn api_segment(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Issuer => "issuer",
            Role::Investor => "investor",
        }
    }

    /// The dashboard route canonically associated with this role.
    ///
    /// Every authenticated user always lands on *some* valid dashboard; this
    /// mapping is what wrong-role redirects resolve against.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Issuer => "/issuer/dashboard",
            Role::Investor => "/investor/dashboard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Issuer => "ISSUER",
            Role::Investor => "INVESTOR",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "ISSUER" => Ok(Role::Issuer),
            "INVESTOR" => Ok(Role::Investor),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Issuer).unwrap(), "\"ISSUER\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"INVESTOR\"").unwrap(),
            Role::Investor
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Issuer".parse::<Role>().unwrap(), Role::Issuer);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn api_segments_and_dashboards_are_consistent() {
        for role in Role::ALL {
            assert!(role.dashboard_path().starts_with(&format!("/{}/", role.api_segment())));
        }
    }
}
