use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use uuid::Uuid;

use crate::errors::internal::{InternalError, UserError};
use crate::types::db::user::{self, Entity as User, Role};

/// UserStore manages user accounts and credentials in the database
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create a new UserStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a new user with role USER
    ///
    /// # Arguments
    /// * `username` - The username for the new user
    /// * `password` - The plaintext password to hash and store
    /// * `display_name` - Optional display name shown on reports
    /// * `avatar_url` - Optional avatar image URL
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(InternalError)` - DuplicateUsername if the username is taken
    pub async fn create_user(
        &self,
        username: String,
        password: String,
        display_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<user::Model, InternalError> {
        let password_hash = self.hash_password(&password)?;

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.clone()),
            password_hash: Set(password_hash),
            display_name: Set(display_name),
            avatar_url: Set(avatar_url),
            role: Set(Role::User),
            created_at: Set(Utc::now().timestamp()),
        };

        let created = new_user.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                InternalError::User(UserError::DuplicateUsername(username.clone()))
            } else {
                InternalError::database("create_user", e)
            }
        })?;

        Ok(created)
    }

    /// Verify user credentials
    ///
    /// # Returns
    /// * `Ok(Some(user::Model))` - Credentials are valid
    /// * `Ok(None)` - Unknown username or wrong password (indistinguishable)
    /// * `Err(InternalError)` - Database failure
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("verify_credentials", e))?;

        let user = match user {
            Some(u) => u,
            None => return Ok(None),
        };

        let parsed_hash = match PasswordHash::new(&user.password_hash) {
            Ok(h) => h,
            Err(_) => return Ok(None),
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(Some(user)),
            Err(_) => Ok(None),
        }
    }

    /// Fetch a user by id
    pub async fn get_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))
    }

    /// Fetch a user by id, failing when the row is absent
    pub async fn require(&self, user_id: &str) -> Result<user::Model, InternalError> {
        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| InternalError::User(UserError::NotFound(user_id.to_string())))
    }

    /// Fetch all users whose id is in the given set
    ///
    /// Used to resolve the authors of a page of issues in one query.
    pub async fn find_by_ids(&self, user_ids: &[String]) -> Result<Vec<user::Model>, InternalError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        User::find()
            .filter(user::Column::Id.is_in(user_ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_users_by_ids", e))
    }

    /// Overwrite a user's role, looked up by username
    ///
    /// Role changes are an out-of-band administrative action (CLI only);
    /// nothing in the HTTP surface reaches this method.
    pub async fn set_role(&self, username: &str, role: Role) -> Result<user::Model, InternalError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("set_role", e))?
            .ok_or_else(|| InternalError::User(UserError::NotFound(username.to_string())))?;

        let mut active: user::ActiveModel = user.into();
        active.role = Set(role);

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_role", e))?;

        Ok(updated)
    }

    /// Count all registered users
    pub async fn count(&self) -> Result<u64, InternalError> {
        User::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }

    fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::User(UserError::PasswordHash(e.to_string())))?
            .to_string();

        Ok(hash)
    }
}
