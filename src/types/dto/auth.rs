use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username for credential login (3-50 characters)
    pub username: String,

    /// Password (minimum 8 characters)
    pub password: String,

    /// Display name shown next to reported issues
    pub display_name: Option<String>,

    /// Avatar image URL
    pub avatar_url: Option<String>,
}

/// Response model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// User ID (UUID)
    pub user_id: String,

    /// Registered username
    pub username: String,
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the authentication token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// User ID (UUID)
    pub user_id: String,

    /// Username of the authenticated user
    pub username: String,

    /// Role of the authenticated user (USER or ADMIN)
    pub role: String,

    /// Token expiration time (Unix timestamp)
    pub expires_at: i64,
}
