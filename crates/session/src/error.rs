//! Form-level failure shape for login/registration.

use thiserror::Error;

use assetgate_gateway::GatewayError;

/// Why a login/registration attempt did not produce a session.
///
/// The Display strings are what forms show; raw gateway errors never escape
/// past this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// The backend rejected the presented credentials (401 on the auth call
    /// itself). Carries the backend message when one was sent.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The backend rejected the submission (other 4xx, e.g. duplicate
    /// email). Message surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    /// 5xx from the backend.
    #[error("server error, please try again later")]
    Server,

    /// The request never completed (timeout, DNS, offline).
    #[error("network error, please check your connection and try again")]
    Network,
}

/// Which auth call produced the error; picks the fallback message when the
/// backend sent none.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum AuthAttempt {
    Login,
    Register,
}

impl AuthAttempt {
    fn fallback(self) -> &'static str {
        match self {
            AuthAttempt::Login => "Invalid credentials",
            AuthAttempt::Register => "Registration failed",
        }
    }
}

pub(crate) fn classify(err: GatewayError, attempt: AuthAttempt) -> AuthFailure {
    match err {
        GatewayError::Status { status: 401, message } => {
            AuthFailure::InvalidCredentials(message.unwrap_or_else(|| attempt.fallback().to_string()))
        }
        GatewayError::Status { status, message } if (400..500).contains(&status) => {
            AuthFailure::Rejected(message.unwrap_or_else(|| attempt.fallback().to_string()))
        }
        GatewayError::Status { .. } => AuthFailure::Server,
        GatewayError::Timeout | GatewayError::Network(_) => AuthFailure::Network,
        // Auth attempts opt out of eviction, so a bare Unauthorized should
        // not reach here; treat it as a credential failure if it does.
        GatewayError::Unauthorized => {
            AuthFailure::InvalidCredentials(attempt.fallback().to_string())
        }
        GatewayError::Decode(_) | GatewayError::Build(_) => AuthFailure::Server,
    }
}
