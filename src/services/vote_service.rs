use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::api::IssueApiError;
use crate::stores::{IssueStore, VoteStore};
use crate::types::dto::issues::VoteResponse;
use crate::types::internal::Claims;

/// Vote service that owns the toggle operation
///
/// The toggle is strict: a present vote is withdrawn, an absent vote is
/// cast, and repeated calls alternate. The returned count is always
/// recomputed from the vote rows after the mutation.
pub struct VoteService {
    issue_store: Arc<IssueStore>,
    vote_store: Arc<VoteStore>,
}

impl VoteService {
    /// Create VoteService from AppData
    pub fn new(app_data: &Arc<AppData>) -> Self {
        Self {
            issue_store: app_data.issue_store.clone(),
            vote_store: app_data.vote_store.clone(),
        }
    }

    /// Toggle the actor's vote on an issue
    ///
    /// A duplicate concurrent cast is stopped by the (user, issue) unique
    /// constraint and reported as "already voted" instead of an error; the
    /// fresh count keeps the response consistent either way.
    ///
    /// # Arguments
    /// * `actor` - Validated claims of the authenticated voter
    /// * `issue_id` - Issue to vote on
    ///
    /// # Returns
    /// * `Ok(VoteResponse)` - Post-toggle vote state for the actor
    /// * `Err(IssueApiError)` - NotFound when the issue does not exist
    pub async fn toggle_vote(
        &self,
        actor: &Claims,
        issue_id: &str,
    ) -> Result<VoteResponse, IssueApiError> {
        let issue = self
            .issue_store
            .require(issue_id)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let existing = self
            .vote_store
            .find(&actor.sub, &issue.id)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let has_user_voted = match existing {
            Some(vote) => {
                self.vote_store
                    .withdraw(&vote.id)
                    .await
                    .map_err(IssueApiError::from_internal_error)?;
                false
            }
            None => {
                // cast() returns false when the unique constraint caught a
                // concurrent duplicate; either way the vote now exists.
                self.vote_store
                    .cast(&actor.sub, &issue.id)
                    .await
                    .map_err(IssueApiError::from_internal_error)?;
                true
            }
        };

        let vote_count = self
            .vote_store
            .count_for_issue(&issue.id)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        Ok(VoteResponse {
            has_user_voted,
            vote_count,
        })
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod vote_service_tests;
