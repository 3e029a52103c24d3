use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::api::AuthError;
use crate::types::internal::Claims;

/// Manages JWT token generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: 60,
        }
    }

    /// Access token lifetime in seconds
    pub fn expires_in_seconds(&self) -> i64 {
        self.jwt_expiration_minutes * 60
    }

    /// Generate a JWT for the given user id
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded JWT or an error
    pub fn generate_jwt(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.expires_in_seconds(),
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("Failed to generate JWT: {}", e);
            AuthError::internal_server_error()
        })?;

        Ok(token)
    }

    /// Validate a JWT and return the claims
    ///
    /// # Returns
    /// * `Result<Claims, AuthError>` - The decoded claims or an error
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

    #[test]
    fn test_generate_jwt_roundtrips_through_validation() {
        let token_service = TokenService::new(TEST_SECRET.to_string());
        let user_id = uuid::Uuid::new_v4().to_string();

        let token = token_service.generate_jwt(&user_id).expect("generate failed");
        let claims = token_service.validate_jwt(&token).expect("validate failed");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_validate_jwt_fails_with_wrong_secret() {
        let token_service = TokenService::new(TEST_SECRET.to_string());
        let other_service = TokenService::new("another-secret-key-minimum-32-chars".to_string());

        let token = token_service
            .generate_jwt("some-user")
            .expect("generate failed");

        match other_service.validate_jwt(&token) {
            Err(AuthError::InvalidToken(_)) => {}
            other => panic!("Expected InvalidToken error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_jwt_fails_with_expired_token() {
        let token_service = TokenService::new(TEST_SECRET.to_string());

        let now = Utc::now().timestamp();
        let expired_claims = Claims {
            sub: "some-user".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let expired_token = encode(
            &Header::new(Algorithm::HS256),
            &expired_claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("encode failed");

        match token_service.validate_jwt(&expired_token) {
            Err(AuthError::ExpiredToken(_)) => {}
            other => panic!("Expected ExpiredToken error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_jwt_fails_with_garbage() {
        let token_service = TokenService::new(TEST_SECRET.to_string());

        match token_service.validate_jwt("not-a-jwt") {
            Err(AuthError::InvalidToken(_)) => {}
            other => panic!("Expected InvalidToken error, got {:?}", other),
        }
    }
}
