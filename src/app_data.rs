use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::TokenService;
use crate::stores::{IssueStore, UserStore, VoteStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main and shared across services.
/// This eliminates store duplication and keeps service constructors stable.
///
/// # Architecture
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ user_store (Arc<UserStore>)
///   ├─ issue_store (Arc<IssueStore>)
///   ├─ vote_store (Arc<VoteStore>)
///   └─ token_service (Arc<TokenService>)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to services and the CLI
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub issue_store: Arc<IssueStore>,
    pub vote_store: Arc<VoteStore>,
    pub token_service: Arc<TokenService>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be established and migrated before
    /// calling this.
    pub fn init(db: DatabaseConnection, jwt_secret: String) -> Arc<Self> {
        tracing::debug!("Creating stores...");
        let user_store = Arc::new(UserStore::new(db.clone()));
        let issue_store = Arc::new(IssueStore::new(db.clone()));
        let vote_store = Arc::new(VoteStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(jwt_secret));
        tracing::debug!("Stores created");

        Arc::new(Self {
            db,
            user_store,
            issue_store,
            vote_store,
            token_service,
        })
    }
}
