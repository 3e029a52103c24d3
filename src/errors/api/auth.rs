use crate::errors::internal::{InternalError, UserError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Registration input failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Authorization header is missing
    #[oai(status = 401)]
    MissingAuthHeader(Json<ErrorResponse>),

    /// Authorization header format is invalid
    #[oai(status = 401)]
    InvalidAuthHeader(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        AuthError::DuplicateUsername(Json(ErrorResponse {
            error: "duplicate_username".to_string(),
            message: "Username already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(reason: impl Into<String>) -> Self {
        AuthError::ValidationFailed(Json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: reason.into(),
            status_code: 400,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed JWT".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse {
            error: "expired_token".to_string(),
            message: "JWT has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create a MissingAuthHeader error
    pub fn missing_auth_header() -> Self {
        AuthError::MissingAuthHeader(Json(ErrorResponse {
            error: "missing_auth_header".to_string(),
            message: "Authorization header is required".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidAuthHeader error
    pub fn invalid_auth_header() -> Self {
        AuthError::InvalidAuthHeader(Json(ErrorResponse {
            error: "invalid_auth_header".to_string(),
            message: "Invalid Authorization header format".to_string(),
            status_code: 401,
        }))
    }

    /// Convert InternalError to AuthError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::DuplicateUsername(username)) => {
                tracing::debug!("Registration rejected, username taken: {}", username);
                Self::duplicate_username()
            }
            // Do not reveal whether the username or the password was wrong
            InternalError::User(UserError::NotFound(_)) => Self::invalid_credentials(),
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error without exposing details
    pub fn internal_server_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::DuplicateUsername(json) => json.0.message.clone(),
            AuthError::ValidationFailed(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::MissingAuthHeader(json) => json.0.message.clone(),
            AuthError::InvalidAuthHeader(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
