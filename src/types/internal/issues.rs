use crate::types::db::issue::{Category, IssueStatus};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Validated listing filter. Built by the service layer from raw query
/// parameters; all predicates present here are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub category: Option<Category>,
    pub status: Option<IssueStatus>,
    pub text_search: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

impl IssueFilter {
    pub fn page(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: offset.unwrap_or(0),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_text_search(mut self, needle: impl Into<String>) -> Self {
        self.text_search = Some(needle.into());
        self
    }
}
