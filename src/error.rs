use thiserror::Error;

/// Everything that can go wrong in the show. None of it is fatal: callers
/// log the error and fall back to static content or skip the action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShowError {
    #[error("missing anchor `{0}`")]
    MissingAnchor(&'static str),
    #[error("fetch {path} failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("fetch {path} returned status {status}")]
    Status { path: String, status: u16 },
    #[error("could not parse {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("{path} has no content")]
    EmptyContent { path: String },
}

pub type ShowResult<T> = Result<T, ShowError>;
