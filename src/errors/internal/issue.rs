use thiserror::Error;

#[derive(Error, Debug)]
pub enum IssueError {
    #[error("Issue not found: {0}")]
    NotFound(String),
}
