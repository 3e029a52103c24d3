use crate::errors::api::auth::AuthError;
use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Admin endpoint error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Authentication required
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Admin role required
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AdminError {
    /// Create an Unauthenticated error
    pub fn unauthenticated() -> Self {
        AdminError::Unauthenticated(Json(ErrorResponse {
            error: "authentication_required".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        AdminError::Forbidden(Json(ErrorResponse {
            error: "admin_required".to_string(),
            message: "Admin access required".to_string(),
            status_code: 403,
        }))
    }

    /// Convert InternalError to AdminError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        tracing::error!("Unexpected error in admin operation: {}", err);
        Self::internal_server_error()
    }

    /// Create a generic internal server error without exposing details
    pub fn internal_server_error() -> Self {
        AdminError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminError::Unauthenticated(json) => json.0.message.clone(),
            AdminError::Forbidden(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<AuthError> for AdminError {
    /// Token validation failures collapse to a generic 401 on admin routes
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(_) => Self::internal_server_error(),
            _ => Self::unauthenticated(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
