// Services layer - Business logic and orchestration
pub mod admin_service;
pub mod issue_service;
pub mod token_service;
pub mod vote_service;

pub use admin_service::AdminService;
pub use issue_service::IssueService;
pub use token_service::TokenService;
pub use vote_service::VoteService;
