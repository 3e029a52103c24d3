use std::sync::Arc;

use poem::http::HeaderMap;
use poem_openapi::{payload::Json, OpenApi, Tags};
use sea_orm::ActiveEnum;

use crate::api::helpers;
use crate::errors::api::AuthError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::auth::{
    LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, WhoAmIResponse,
};

const USERNAME_MIN_CHARS: usize = 3;
const USERNAME_MAX_CHARS: usize = 50;
const PASSWORD_MIN_CHARS: usize = 8;

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    /// Create a new AuthApi with the given UserStore and TokenService
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account
    ///
    /// Creates the user with role USER. The role is never changed through
    /// the HTTP surface.
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisterResponse>, AuthError> {
        let username_chars = body.username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_chars) {
            return Err(AuthError::validation_failed(format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN_CHARS, USERNAME_MAX_CHARS
            )));
        }
        if body.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AuthError::validation_failed(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_CHARS
            )));
        }

        let user = self
            .user_store
            .create_user(
                body.username.clone(),
                body.password.clone(),
                body.display_name.clone(),
                body.avatar_url.clone(),
            )
            .await
            .map_err(AuthError::from_internal_error)?;

        tracing::info!("User {} registered", user.id);

        Ok(Json(RegisterResponse {
            user_id: user.id,
            username: user.username,
        }))
    }

    /// Login with username and password to receive an authentication token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let user = self
            .user_store
            .verify_credentials(&body.username, &body.password)
            .await
            .map_err(AuthError::from_internal_error)?
            .ok_or_else(AuthError::invalid_credentials)?;

        let access_token = self.token_service.generate_jwt(&user.id)?;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.expires_in_seconds(),
        }))
    }

    /// Verify the bearer token and return the caller's identity
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, headers: &HeaderMap) -> Result<Json<WhoAmIResponse>, AuthError> {
        let claims = helpers::authenticate(headers, &self.token_service)?;

        let user = self
            .user_store
            .get_by_id(&claims.sub)
            .await
            .map_err(AuthError::from_internal_error)?
            .ok_or_else(AuthError::invalid_token)?;

        Ok(Json(WhoAmIResponse {
            user_id: user.id,
            username: user.username,
            role: user.role.to_value(),
            expires_at: claims.exp,
        }))
    }
}
