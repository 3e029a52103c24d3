use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::api::AdminError;
use crate::stores::{IssueStore, UserStore};
use crate::types::db::issue::IssueStatus;
use crate::types::db::user::Role;
use crate::types::dto::admin::StatsResponse;
use crate::types::internal::Claims;

/// Admin service for aggregate dashboard statistics
pub struct AdminService {
    issue_store: Arc<IssueStore>,
    user_store: Arc<UserStore>,
}

impl AdminService {
    /// Create AdminService from AppData
    pub fn new(app_data: &Arc<AppData>) -> Self {
        Self {
            issue_store: app_data.issue_store.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    /// Aggregate counts of issues and users
    ///
    /// The actor's role is read fresh from the database; non-admins are
    /// rejected with Forbidden. Every figure is a live COUNT(*) query.
    pub async fn stats(&self, actor: &Claims) -> Result<StatsResponse, AdminError> {
        let actor_user = self
            .user_store
            .get_by_id(&actor.sub)
            .await
            .map_err(AdminError::from_internal_error)?;

        if !matches!(actor_user, Some(ref u) if u.role == Role::Admin) {
            return Err(AdminError::forbidden());
        }

        let total_issues = self
            .issue_store
            .count_all()
            .await
            .map_err(AdminError::from_internal_error)?;
        let open_issues = self
            .issue_store
            .count_by_status(IssueStatus::Open)
            .await
            .map_err(AdminError::from_internal_error)?;
        let in_progress_issues = self
            .issue_store
            .count_by_status(IssueStatus::InProgress)
            .await
            .map_err(AdminError::from_internal_error)?;
        let resolved_issues = self
            .issue_store
            .count_by_status(IssueStatus::Resolved)
            .await
            .map_err(AdminError::from_internal_error)?;
        let total_users = self
            .user_store
            .count()
            .await
            .map_err(AdminError::from_internal_error)?;

        Ok(StatsResponse {
            total_issues,
            open_issues,
            in_progress_issues,
            resolved_issues,
            total_users,
        })
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod admin_service_tests;
