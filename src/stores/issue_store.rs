use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::internal::{InternalError, IssueError};
use crate::types::db::issue::{self, Category, Entity as Issue, IssueStatus};
use crate::types::internal::IssueFilter;

/// Field set for a new issue report. Validation happens in the service
/// layer before this reaches the store.
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub author_id: String,
}

/// IssueStore manages issue rows in the database
pub struct IssueStore {
    db: DatabaseConnection,
}

impl IssueStore {
    /// Create a new IssueStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new issue with status OPEN
    pub async fn insert(&self, new: NewIssue) -> Result<issue::Model, InternalError> {
        let model = issue::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(new.title),
            description: Set(new.description),
            category: Set(new.category),
            status: Set(IssueStatus::Open),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            address: Set(new.address),
            image_url: Set(new.image_url),
            author_id: Set(new.author_id),
            created_at: Set(Utc::now().timestamp()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_issue", e))
    }

    /// Fetch an issue by id
    pub async fn get_by_id(&self, issue_id: &str) -> Result<Option<issue::Model>, InternalError> {
        Issue::find_by_id(issue_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_issue_by_id", e))
    }

    /// Fetch an issue by id, failing when the row is absent
    pub async fn require(&self, issue_id: &str) -> Result<issue::Model, InternalError> {
        self.get_by_id(issue_id)
            .await?
            .ok_or_else(|| InternalError::Issue(IssueError::NotFound(issue_id.to_string())))
    }

    /// Overwrite the status of an issue (last writer wins)
    pub async fn update_status(
        &self,
        current: issue::Model,
        status: IssueStatus,
    ) -> Result<issue::Model, InternalError> {
        let mut active: issue::ActiveModel = current.into();
        active.status = Set(status);

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_issue_status", e))
    }

    /// List issues matching the filter, most recent first
    ///
    /// Active predicates are ANDed. Ordering is creation time descending with
    /// id as a deterministic tie-breaker, so limit/offset pages are stable.
    pub async fn list(&self, filter: &IssueFilter) -> Result<Vec<issue::Model>, InternalError> {
        let mut condition = Condition::all();

        if let Some(category) = filter.category {
            condition = condition.add(issue::Column::Category.eq(category));
        }
        if let Some(status) = filter.status {
            condition = condition.add(issue::Column::Status.eq(status));
        }
        if let Some(needle) = &filter.text_search {
            let pattern = format!("%{}%", needle.to_lowercase());
            condition = condition.add(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            issue::Entity,
                            issue::Column::Title,
                        ))))
                        .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            issue::Entity,
                            issue::Column::Description,
                        ))))
                        .like(&pattern),
                    ),
            );
        }

        Issue::find()
            .filter(condition)
            .order_by_desc(issue::Column::CreatedAt)
            .order_by_desc(issue::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_issues", e))
    }

    /// Count all issues
    pub async fn count_all(&self) -> Result<u64, InternalError> {
        Issue::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_issues", e))
    }

    /// Count issues with the given status
    pub async fn count_by_status(&self, status: IssueStatus) -> Result<u64, InternalError> {
        Issue::find()
            .filter(issue::Column::Status.eq(status))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_issues_by_status", e))
    }
}
