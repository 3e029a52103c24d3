pub mod auth;
pub mod issues;

pub use auth::Claims;
pub use issues::IssueFilter;
