use thiserror::Error;

pub mod database;
pub mod issue;
pub mod user;

pub use database::DatabaseError;
pub use issue::IssueError;
pub use user::UserError;

/// Internal error type for store operations
///
/// Infrastructure errors (database) are shared; domain errors are
/// store-specific. Not exposed via API - endpoints must convert to one of
/// the API error types before returning.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Issue(#[from] IssueError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }
}
