use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use uuid::Uuid;

use crate::errors::internal::InternalError;
use crate::types::db::vote::{self, Entity as Vote};

/// VoteStore manages vote rows in the database
///
/// Rows are only inserted and deleted; the (user_id, issue_id) unique index
/// is the safety net against duplicate concurrent casts.
pub struct VoteStore {
    db: DatabaseConnection,
}

impl VoteStore {
    /// Create a new VoteStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find the vote of a user on an issue, if any
    pub async fn find(
        &self,
        user_id: &str,
        issue_id: &str,
    ) -> Result<Option<vote::Model>, InternalError> {
        Vote::find()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::IssueId.eq(issue_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_vote", e))
    }

    /// Insert a vote row for (user, issue)
    ///
    /// Returns true when the row was inserted and false when the unique
    /// constraint rejected a duplicate - the caller treats the latter as
    /// "already voted", not as a failure.
    pub async fn cast(&self, user_id: &str, issue_id: &str) -> Result<bool, InternalError> {
        let model = vote::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            issue_id: Set(issue_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(e) => Err(InternalError::database("cast_vote", e)),
        }
    }

    /// Delete a vote row by primary key
    pub async fn withdraw(&self, vote_id: &str) -> Result<(), InternalError> {
        Vote::delete_by_id(vote_id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("withdraw_vote", e))?;

        Ok(())
    }

    /// Count the vote rows of a single issue
    ///
    /// Always a fresh COUNT(*) - the application never maintains a counter.
    pub async fn count_for_issue(&self, issue_id: &str) -> Result<u64, InternalError> {
        Vote::find()
            .filter(vote::Column::IssueId.eq(issue_id))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_votes", e))
    }

    /// Fetch all vote rows of the given issues
    ///
    /// Used to derive vote_count and has_user_voted for a page of issues in
    /// one query.
    pub async fn for_issues(&self, issue_ids: &[String]) -> Result<Vec<vote::Model>, InternalError> {
        if issue_ids.is_empty() {
            return Ok(Vec::new());
        }

        Vote::find()
            .filter(vote::Column::IssueId.is_in(issue_ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("votes_for_issues", e))
    }
}
