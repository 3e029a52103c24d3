use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::api::IssueApiError;
use crate::stores::{IssueStore, NewIssue, UserStore, VoteStore};
use crate::types::db::issue::{self, Category, IssueStatus};
use crate::types::db::user::{self, Role};
use crate::types::dto::issues::{AuthorView, CreateIssueRequest, IssueView};
use crate::types::internal::{Claims, IssueFilter};

/// Maximum length of an issue title, in characters
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum length of an issue description, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Sentinel filter value meaning "no filter"
const FILTER_ALL: &str = "ALL";

/// Issue service that owns reporting, the feed query and the status
/// lifecycle
///
/// All validation runs before any store mutation, and every returned view
/// derives vote_count and has_user_voted from the current vote rows rather
/// than a stored counter.
pub struct IssueService {
    issue_store: Arc<IssueStore>,
    vote_store: Arc<VoteStore>,
    user_store: Arc<UserStore>,
}

impl IssueService {
    /// Create IssueService from AppData
    pub fn new(app_data: &Arc<AppData>) -> Self {
        Self {
            issue_store: app_data.issue_store.clone(),
            vote_store: app_data.vote_store.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    /// Report a new issue
    ///
    /// The issue starts in status OPEN with an empty vote set.
    ///
    /// # Arguments
    /// * `actor` - Validated claims of the authenticated reporter
    /// * `req` - Report fields
    ///
    /// # Returns
    /// * `Ok(IssueView)` - The created issue (vote_count=0, has_user_voted=false)
    /// * `Err(IssueApiError)` - InvalidArgument when a field fails validation
    pub async fn create_issue(
        &self,
        actor: &Claims,
        req: CreateIssueRequest,
    ) -> Result<IssueView, IssueApiError> {
        let category = Self::validate_report(&req)?;

        let author = self
            .user_store
            .require(&actor.sub)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let created = self
            .issue_store
            .insert(NewIssue {
                title: req.title,
                description: req.description,
                category,
                latitude: req.latitude,
                longitude: req.longitude,
                address: req.address,
                image_url: req.image_url,
                author_id: author.id.clone(),
            })
            .await
            .map_err(IssueApiError::from_internal_error)?;

        tracing::info!("Issue {} reported by user {}", created.id, author.id);

        Ok(Self::view_from(created, Self::author_view(&author), 0, false))
    }

    /// List issues for the feed
    ///
    /// Category and status filters apply when present and not the "ALL"
    /// sentinel; a text needle matches case-insensitively in the title or
    /// the description. Active predicates are ANDed. The result is a single
    /// page ordered by creation time descending.
    ///
    /// # Arguments
    /// * `viewer` - Claims of the viewing user, when authenticated
    /// * `category`/`status`/`search` - Raw filter values from the query string
    /// * `limit`/`offset` - Page window (limit defaults to 20)
    pub async fn list_issues(
        &self,
        viewer: Option<&Claims>,
        category: Option<String>,
        status: Option<String>,
        search: Option<String>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<IssueView>, IssueApiError> {
        let mut filter = IssueFilter::page(limit, offset);

        if let Some(raw) = category.as_deref().filter(|v| *v != FILTER_ALL) {
            let category = Category::parse(raw)
                .ok_or_else(|| IssueApiError::invalid_argument(format!("Invalid category: {}", raw)))?;
            filter = filter.with_category(category);
        }
        if let Some(raw) = status.as_deref().filter(|v| *v != FILTER_ALL) {
            let status = IssueStatus::parse(raw)
                .ok_or_else(|| IssueApiError::invalid_argument(format!("Invalid status: {}", raw)))?;
            filter = filter.with_status(status);
        }
        if let Some(needle) = search.filter(|s| !s.is_empty()) {
            filter = filter.with_text_search(needle);
        }

        let issues = self
            .issue_store
            .list(&filter)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        self.enrich_page(viewer, issues).await
    }

    /// Transition the status of an issue
    ///
    /// Only admins may do this; the actor's role is read fresh from the
    /// database so CLI role changes apply immediately. The transition graph
    /// is free - any status may be set from any other, including reopening
    /// a resolved issue. The write is last-writer-wins.
    ///
    /// # Arguments
    /// * `actor` - Validated claims of the authenticated caller
    /// * `issue_id` - Issue to transition
    /// * `status_raw` - Wire representation of the target status
    ///
    /// # Returns
    /// * `Ok(IssueView)` - The updated issue
    /// * `Err(IssueApiError)` - Forbidden, InvalidArgument or NotFound; the
    ///   issue is untouched in every error case
    pub async fn set_status(
        &self,
        actor: &Claims,
        issue_id: &str,
        status_raw: &str,
    ) -> Result<IssueView, IssueApiError> {
        let actor_user = self
            .user_store
            .get_by_id(&actor.sub)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let actor_user = match actor_user {
            Some(u) if u.role == Role::Admin => u,
            _ => return Err(IssueApiError::forbidden()),
        };

        let status = IssueStatus::parse(status_raw)
            .ok_or_else(|| IssueApiError::invalid_argument(format!("Invalid status: {}", status_raw)))?;

        let issue = self
            .issue_store
            .require(issue_id)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let updated = self
            .issue_store
            .update_status(issue, status)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        tracing::info!(
            "Issue {} status set to {} by admin {}",
            updated.id,
            status_raw,
            actor_user.id
        );

        self.view_of(Some(actor), updated).await
    }

    /// Build the enriched view of a single issue for the given viewer
    async fn view_of(
        &self,
        viewer: Option<&Claims>,
        issue: issue::Model,
    ) -> Result<IssueView, IssueApiError> {
        let vote_count = self
            .vote_store
            .count_for_issue(&issue.id)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let has_user_voted = match viewer {
            Some(claims) => self
                .vote_store
                .find(&claims.sub, &issue.id)
                .await
                .map_err(IssueApiError::from_internal_error)?
                .is_some(),
            None => false,
        };

        let author = self
            .user_store
            .get_by_id(&issue.author_id)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let author_view = match &author {
            Some(user) => Self::author_view(user),
            None => Self::unknown_author(&issue.author_id),
        };

        Ok(Self::view_from(issue, author_view, vote_count, has_user_voted))
    }

    /// Enrich a page of issues with authors and derived vote data
    ///
    /// One query for the page's vote rows and one for its authors; counts
    /// and the viewer's vote flags are derived from the fetched rows.
    async fn enrich_page(
        &self,
        viewer: Option<&Claims>,
        issues: Vec<issue::Model>,
    ) -> Result<Vec<IssueView>, IssueApiError> {
        let issue_ids: Vec<String> = issues.iter().map(|i| i.id.clone()).collect();
        let votes = self
            .vote_store
            .for_issues(&issue_ids)
            .await
            .map_err(IssueApiError::from_internal_error)?;

        let mut vote_counts: HashMap<&str, u64> = HashMap::new();
        let mut voted_by_viewer: HashSet<&str> = HashSet::new();
        let viewer_id = viewer.map(|claims| claims.sub.as_str());
        for vote in &votes {
            *vote_counts.entry(vote.issue_id.as_str()).or_insert(0) += 1;
            if viewer_id == Some(vote.user_id.as_str()) {
                voted_by_viewer.insert(vote.issue_id.as_str());
            }
        }

        let author_ids: Vec<String> = issues
            .iter()
            .map(|i| i.author_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let authors: HashMap<String, user::Model> = self
            .user_store
            .find_by_ids(&author_ids)
            .await
            .map_err(IssueApiError::from_internal_error)?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let views = issues
            .into_iter()
            .map(|issue| {
                let vote_count = vote_counts.get(issue.id.as_str()).copied().unwrap_or(0);
                let has_user_voted = voted_by_viewer.contains(issue.id.as_str());
                let author_view = match authors.get(&issue.author_id) {
                    Some(user) => Self::author_view(user),
                    None => Self::unknown_author(&issue.author_id),
                };
                Self::view_from(issue, author_view, vote_count, has_user_voted)
            })
            .collect();

        Ok(views)
    }

    fn validate_report(req: &CreateIssueRequest) -> Result<Category, IssueApiError> {
        if req.title.is_empty() {
            return Err(IssueApiError::invalid_argument("Title must not be empty"));
        }
        if req.title.chars().count() > TITLE_MAX_CHARS {
            return Err(IssueApiError::invalid_argument(format!(
                "Title must be at most {} characters",
                TITLE_MAX_CHARS
            )));
        }
        if req.description.is_empty() {
            return Err(IssueApiError::invalid_argument(
                "Description must not be empty",
            ));
        }
        if req.description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(IssueApiError::invalid_argument(format!(
                "Description must be at most {} characters",
                DESCRIPTION_MAX_CHARS
            )));
        }
        if !req.latitude.is_finite() || !req.longitude.is_finite() {
            return Err(IssueApiError::invalid_argument(
                "Coordinates must be finite numbers",
            ));
        }

        Category::parse(&req.category)
            .ok_or_else(|| IssueApiError::invalid_argument(format!("Invalid category: {}", req.category)))
    }

    fn author_view(user: &user::Model) -> AuthorView {
        AuthorView {
            id: user.id.clone(),
            name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }

    // Issues always have an author row; this covers rows orphaned by
    // out-of-band deletes without failing the whole page.
    fn unknown_author(author_id: &str) -> AuthorView {
        AuthorView {
            id: author_id.to_string(),
            name: None,
            avatar_url: None,
        }
    }

    fn view_from(
        issue: issue::Model,
        author: AuthorView,
        vote_count: u64,
        has_user_voted: bool,
    ) -> IssueView {
        IssueView {
            id: issue.id,
            title: issue.title,
            description: issue.description,
            category: issue.category.into(),
            status: issue.status.into(),
            latitude: issue.latitude,
            longitude: issue.longitude,
            address: issue.address,
            image_url: issue.image_url,
            created_at: issue.created_at,
            author,
            vote_count,
            has_user_voted,
        }
    }
}

#[cfg(test)]
#[path = "issue_service_tests.rs"]
mod issue_service_tests;
