// Stores layer - Data access and repository pattern
pub mod issue_store;
pub mod user_store;
pub mod vote_store;

pub use issue_store::{IssueStore, NewIssue};
pub use user_store::UserStore;
pub use vote_store::VoteStore;
