//! Error taxonomy for calls through the gateway.

use thiserror::Error;

/// Why a gateway call failed.
///
/// `Unauthorized` is reserved for 401s handled by the centralized eviction
/// path; auth-attempt calls that opt out of eviction surface their 401 as
/// `Status { status: 401, .. }` so the backend message reaches the form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request could not complete (DNS, connection refused, offline).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the bounded timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered 401 on a session-bearing call. The credential
    /// store has already been cleared and the unauthorized hook fired.
    #[error("unauthorized")]
    Unauthorized,

    /// Non-2xx status (other than an evicting 401). `message` is the
    /// backend's `message` body field when one was parseable.
    #[error("status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// 2xx response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("client construction failed: {0}")]
    Build(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_with_and_without_message() {
        let with = GatewayError::Status {
            status: 409,
            message: Some("duplicate email".into()),
        };
        let without = GatewayError::Status {
            status: 500,
            message: None,
        };

        assert_eq!(with.to_string(), "status 409: duplicate email");
        assert_eq!(without.to_string(), "status 500");
    }
}
