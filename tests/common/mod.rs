// Common test utilities for integration tests

use std::sync::Arc;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use civicconnect_backend::app_data::AppData;
use civicconnect_backend::types::internal::Claims;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// Creates a test database with migrations applied, wrapped in AppData
pub async fn setup_app_data() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    AppData::init(db, TEST_JWT_SECRET.to_string())
}

/// Register a user and return claims acting as that user
pub async fn register_user(app_data: &AppData, username: &str) -> Claims {
    let user = app_data
        .user_store
        .create_user(username.to_string(), "password123".to_string(), None, None)
        .await
        .expect("Failed to create user");

    let now = Utc::now().timestamp();
    Claims {
        sub: user.id,
        exp: now + 3600,
        iat: now,
    }
}
