use axum::http::StatusCode;
use uuid::Uuid;

use super::model::JobState;
use crate::infrastructure::queue::PublishError;

/// Failures surfaced by the job lifecycle. Everything user-facing maps to an
/// HTTP status in the handler layer via `status_code`.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("invalid source URL: {0}")]
    InvalidInput(String),

    #[error("job quota exhausted for this account")]
    QuotaExceeded,

    #[error("job {0} not found")]
    NotFound(Uuid),

    /// A transition was attempted from the wrong state. Submitting a job
    /// twice is a caller bug, not something to silently ignore.
    #[error("job is {actual:?}, expected {expected:?}")]
    InvalidState { expected: JobState, actual: JobState },

    #[error("failed to enqueue job: {0}")]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl JobError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JobError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            JobError::QuotaExceeded => StatusCode::FORBIDDEN,
            JobError::NotFound(_) => StatusCode::NOT_FOUND,
            JobError::InvalidState { .. } => StatusCode::CONFLICT,
            JobError::Publish(_) => StatusCode::BAD_GATEWAY,
            JobError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
