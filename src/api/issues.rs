use std::sync::Arc;

use poem::http::HeaderMap;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::errors::api::IssueApiError;
use crate::services::{IssueService, TokenService, VoteService};
use crate::types::dto::issues::{CreateIssueRequest, IssueView, UpdateStatusRequest, VoteResponse};

/// Issue reporting, feed and voting API endpoints
pub struct IssuesApi {
    issue_service: Arc<IssueService>,
    vote_service: Arc<VoteService>,
    token_service: Arc<TokenService>,
}

impl IssuesApi {
    /// Create a new IssuesApi with the given services
    pub fn new(
        issue_service: Arc<IssueService>,
        vote_service: Arc<VoteService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            issue_service,
            vote_service,
            token_service,
        }
    }
}

/// API tags for issue endpoints
#[derive(Tags)]
enum IssueTags {
    /// Issue reporting and feed
    Issues,
}

#[OpenApi]
impl IssuesApi {
    /// List issues for the feed
    ///
    /// Anonymous viewers get has_user_voted=false on every item. Category
    /// and status accept the sentinel value ALL meaning "no filter".
    #[oai(path = "/issues", method = "get", tag = "IssueTags::Issues")]
    async fn list_issues(
        &self,
        headers: &HeaderMap,
        category: Query<Option<String>>,
        status: Query<Option<String>>,
        search: Query<Option<String>>,
        limit: Query<Option<u64>>,
        offset: Query<Option<u64>>,
    ) -> Result<Json<Vec<IssueView>>, IssueApiError> {
        let viewer = helpers::maybe_authenticate(headers, &self.token_service);

        let issues = self
            .issue_service
            .list_issues(
                viewer.as_ref(),
                category.0,
                status.0,
                search.0,
                limit.0,
                offset.0,
            )
            .await?;

        Ok(Json(issues))
    }

    /// Report a new issue
    #[oai(path = "/issues", method = "post", tag = "IssueTags::Issues")]
    async fn create_issue(
        &self,
        headers: &HeaderMap,
        body: Json<CreateIssueRequest>,
    ) -> Result<Json<IssueView>, IssueApiError> {
        let claims = helpers::authenticate(headers, &self.token_service)?;

        let issue = self.issue_service.create_issue(&claims, body.0).await?;

        Ok(Json(issue))
    }

    /// Toggle the caller's vote on an issue
    #[oai(path = "/issues/:issue_id/vote", method = "post", tag = "IssueTags::Issues")]
    async fn toggle_vote(
        &self,
        headers: &HeaderMap,
        issue_id: Path<String>,
    ) -> Result<Json<VoteResponse>, IssueApiError> {
        let claims = helpers::authenticate(headers, &self.token_service)?;

        let result = self.vote_service.toggle_vote(&claims, &issue_id.0).await?;

        Ok(Json(result))
    }

    /// Transition the status of an issue (admin only)
    #[oai(path = "/issues/:issue_id/status", method = "patch", tag = "IssueTags::Issues")]
    async fn set_status(
        &self,
        headers: &HeaderMap,
        issue_id: Path<String>,
        body: Json<UpdateStatusRequest>,
    ) -> Result<Json<IssueView>, IssueApiError> {
        let claims = helpers::authenticate(headers, &self.token_service)?;

        let issue = self
            .issue_service
            .set_status(&claims, &issue_id.0, &body.status)
            .await?;

        Ok(Json(issue))
    }
}
