//! Shared error type across Kinjar crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No (or an unknown) session.
    Unauthenticated,
    /// Authenticated but lacking the required role.
    Unauthorized,
    /// Missing entity, or an entity the caller may not see.
    NotFound,
    /// Uniqueness or state conflict.
    Conflict,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unauthenticated => "UNAUTHENTICATED",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, KinjarError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum KinjarError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl KinjarError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            KinjarError::BadRequest(_) => ClientCode::BadRequest,
            KinjarError::Unauthenticated => ClientCode::Unauthenticated,
            KinjarError::Unauthorized(_) => ClientCode::Unauthorized,
            KinjarError::NotFound(_) => ClientCode::NotFound,
            KinjarError::Conflict(_) | KinjarError::InvalidState(_) => ClientCode::Conflict,
            KinjarError::Internal(_) => ClientCode::Internal,
        }
    }
}
