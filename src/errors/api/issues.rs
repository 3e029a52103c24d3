use crate::errors::api::auth::AuthError;
use crate::errors::internal::{InternalError, IssueError, UserError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Issue endpoint error types
#[derive(ApiResponse, Debug)]
pub enum IssueApiError {
    /// Authentication required
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Admin role required
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced issue does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Malformed or missing input
    #[oai(status = 400)]
    InvalidArgument(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl IssueApiError {
    /// Create an Unauthenticated error
    pub fn unauthenticated() -> Self {
        IssueApiError::Unauthenticated(Json(ErrorResponse {
            error: "authentication_required".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden() -> Self {
        IssueApiError::Forbidden(Json(ErrorResponse {
            error: "admin_required".to_string(),
            message: "Admin access required".to_string(),
            status_code: 403,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(issue_id: &str) -> Self {
        IssueApiError::NotFound(Json(ErrorResponse {
            error: "issue_not_found".to_string(),
            message: format!("Issue not found: {}", issue_id),
            status_code: 404,
        }))
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        IssueApiError::InvalidArgument(Json(ErrorResponse {
            error: "invalid_argument".to_string(),
            message: reason.into(),
            status_code: 400,
        }))
    }

    /// Convert InternalError to IssueApiError
    ///
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Issue(IssueError::NotFound(issue_id)) => Self::not_found(issue_id),
            // A valid token whose subject no longer exists cannot act
            InternalError::User(UserError::NotFound(_)) => Self::unauthenticated(),
            _ => {
                tracing::error!("Unexpected error in issue operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error without exposing details
    pub fn internal_server_error() -> Self {
        IssueApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            IssueApiError::Unauthenticated(json) => json.0.message.clone(),
            IssueApiError::Forbidden(json) => json.0.message.clone(),
            IssueApiError::NotFound(json) => json.0.message.clone(),
            IssueApiError::InvalidArgument(json) => json.0.message.clone(),
            IssueApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<AuthError> for IssueApiError {
    /// Token validation failures collapse to a generic 401 on issue routes
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(_) => Self::internal_server_error(),
            _ => Self::unauthenticated(),
        }
    }
}

impl fmt::Display for IssueApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
