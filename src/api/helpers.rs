use poem::http::HeaderMap;

use crate::errors::api::AuthError;
use crate::services::TokenService;
use crate::types::internal::Claims;

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(AuthError::missing_auth_header)?
        .to_str()
        .map_err(|_| AuthError::invalid_auth_header())?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::invalid_auth_header());
    }

    Ok(&auth_header[7..])
}

/// Extract and validate the bearer token, returning the claims
///
/// Endpoints requiring authentication call this at the top and convert the
/// error into their own response type with `?`.
pub fn authenticate(headers: &HeaderMap, token_service: &TokenService) -> Result<Claims, AuthError> {
    let token = bearer_token(headers)?;
    token_service.validate_jwt(token)
}

/// Like authenticate, but an absent or invalid token yields None
///
/// Used by endpoints that serve anonymous viewers too (the issue feed).
pub fn maybe_authenticate(headers: &HeaderMap, token_service: &TokenService) -> Option<Claims> {
    authenticate(headers, token_service).ok()
}
