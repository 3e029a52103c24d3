// Role management CLI commands
// Roles are mutated only here; the HTTP surface never changes them.

use crate::errors::internal::{InternalError, UserError};
use crate::stores::UserStore;
use crate::types::db::user::Role;

/// Grant the ADMIN role to a user, looked up by username
///
/// Takes effect on the user's next request: authorization reads the role
/// from the database, not from issued tokens.
pub async fn grant_admin(
    user_store: &UserStore,
    username: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match user_store.set_role(username, Role::Admin).await {
        Ok(user) => {
            tracing::info!("ADMIN role granted to user {} via CLI", user.id);
            println!("ADMIN role granted to '{}' ({})", user.username, user.id);
            Ok(())
        }
        Err(InternalError::User(UserError::NotFound(_))) => {
            println!("Error: no user with username '{}'", username);
            Err("User not found".into())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Revoke the ADMIN role from a user, looked up by username
pub async fn revoke_admin(
    user_store: &UserStore,
    username: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match user_store.set_role(username, Role::User).await {
        Ok(user) => {
            tracing::info!("ADMIN role revoked from user {} via CLI", user.id);
            println!("ADMIN role revoked from '{}' ({})", user.username, user.id);
            Ok(())
        }
        Err(InternalError::User(UserError::NotFound(_))) => {
            println!("Error: no user with username '{}'", username);
            Err("User not found".into())
        }
        Err(e) => Err(Box::new(e)),
    }
}
