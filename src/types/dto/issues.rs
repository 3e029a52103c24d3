use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use crate::types::db;

/// Issue category (wire representation)
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Infrastructure,
    Safety,
    Environment,
    Transportation,
    PublicServices,
    Community,
    Other,
}

impl From<db::issue::Category> for Category {
    fn from(value: db::issue::Category) -> Self {
        match value {
            db::issue::Category::Infrastructure => Category::Infrastructure,
            db::issue::Category::Safety => Category::Safety,
            db::issue::Category::Environment => Category::Environment,
            db::issue::Category::Transportation => Category::Transportation,
            db::issue::Category::PublicServices => Category::PublicServices,
            db::issue::Category::Community => Category::Community,
            db::issue::Category::Other => Category::Other,
        }
    }
}

/// Issue lifecycle status (wire representation)
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

impl From<db::issue::IssueStatus> for IssueStatus {
    fn from(value: db::issue::IssueStatus) -> Self {
        match value {
            db::issue::IssueStatus::Open => IssueStatus::Open,
            db::issue::IssueStatus::InProgress => IssueStatus::InProgress,
            db::issue::IssueStatus::Resolved => IssueStatus::Resolved,
        }
    }
}

/// Author summary embedded in issue views
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AuthorView {
    /// User ID of the author
    pub id: String,

    /// Display name of the author
    pub name: Option<String>,

    /// Avatar image URL of the author
    pub avatar_url: Option<String>,
}

/// An issue enriched with derived vote data for the requesting viewer
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct IssueView {
    /// Issue ID (UUID)
    pub id: String,

    /// Short summary of the issue
    pub title: String,

    /// Detailed description of the issue
    pub description: String,

    /// Issue category
    pub category: Category,

    /// Current lifecycle status
    pub status: IssueStatus,

    /// Latitude of the reported location
    pub latitude: f64,

    /// Longitude of the reported location
    pub longitude: f64,

    /// Free-text address of the reported location
    pub address: Option<String>,

    /// Photo URL attached to the report
    pub image_url: Option<String>,

    /// Creation time (Unix timestamp)
    pub created_at: i64,

    /// Author of the report
    pub author: AuthorView,

    /// Number of votes currently on the issue
    pub vote_count: u64,

    /// Whether the requesting user has voted on the issue
    pub has_user_voted: bool,
}

/// Request model for reporting a new issue
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    /// Short summary (1-100 characters)
    pub title: String,

    /// Detailed description (1-500 characters)
    pub description: String,

    /// Issue category
    pub category: String,

    /// Latitude of the location
    pub latitude: f64,

    /// Longitude of the location
    pub longitude: f64,

    /// Free-text address of the location
    pub address: Option<String>,

    /// Photo URL for the report
    pub image_url: Option<String>,
}

/// Request model for an admin status transition
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status (OPEN, IN_PROGRESS or RESOLVED)
    pub status: String,
}

/// Response model for the vote toggle
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    /// Whether the user now has a vote on the issue
    pub has_user_voted: bool,

    /// Vote count after the toggle, recomputed from the vote rows
    pub vote_count: u64,
}
