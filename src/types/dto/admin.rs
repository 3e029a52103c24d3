use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Aggregate counts for the admin dashboard
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Total number of issues
    pub total_issues: u64,

    /// Number of issues with status OPEN
    pub open_issues: u64,

    /// Number of issues with status IN_PROGRESS
    pub in_progress_issues: u64,

    /// Number of issues with status RESOLVED
    pub resolved_issues: u64,

    /// Total number of registered users
    pub total_users: u64,
}
