// crates/backend-lib/src/error.rs

//! Central error types + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use starboard_common::{ErrorBody, ErrorDetail};
use thiserror::Error;

/// Failures of the authentication gate.
///
/// Token errors keep their own variants so they can be logged apart;
/// the request middleware collapses all of them into `Unauthorized`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token invalid")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("User store failure: {0}")]
    Store(String),
}

/// Failures reported by a store implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate key")]
    DuplicateKey,

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized(_) => "AUTH_001",
            AuthError::InvalidCredentials => "AUTH_002",
            AuthError::DuplicateEmail => "AUTH_003",
            AuthError::TokenInvalid => "AUTH_004",
            AuthError::TokenExpired => "AUTH_005",
            AuthError::Hashing(_) => "AUTH_006",
            AuthError::Signing(_) => "AUTH_007",
            AuthError::Store(_) => "STORE_001",
        }
    }

    /// Collapse any token failure into the single rejection the
    /// middleware hands to clients
    pub fn into_unauthorized(self) -> Self {
        match self {
            AuthError::TokenInvalid => AuthError::Unauthorized("invalid token"),
            AuthError::TokenExpired => AuthError::Unauthorized("token expired"),
            other => other,
        }
    }
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(err) => err.status_code(),
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Auth(err) => err.error_code(),
            AppError::Store(_) => "STORE_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::NotFound(_) => "NF_001",
            AppError::Upstream(_) => "UPSTREAM_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Auth(AuthError::DuplicateEmail) => "Email already registered".to_string(),
            AppError::Auth(AuthError::InvalidCredentials) => {
                "Invalid email or password".to_string()
            },
            AppError::Auth(AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_)) => {
                "An internal server error occurred".to_string()
            },
            AppError::Auth(_) => "Authentication required".to_string(),
            AppError::Store(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::InvalidInput(msg) => format!("Invalid input: {msg}"),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Upstream(_) => "Catalog service unavailable".to_string(),
        }
    }

    /// Whether the detailed message may contain backend internals
    fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures can carry SQL or upstream detail; those are
        // logged here and never sent to the client.
        let message = if self.is_internal() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
            self.sanitized_message()
        } else if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::Auth(self).into_response()
    }
}
