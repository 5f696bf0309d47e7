use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle states. `Completed` and `Failed` are terminal: once a job is in
/// either, no further transition is honored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "job_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        }
    }
}

/// One transcription request and its lifecycle record. Mutated only through
/// the store's transition methods, never by direct field writes elsewhere.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Job {
    pub id: Uuid,
    /// None for anonymous jobs, which bypass quota and usage accounting.
    pub owner_id: Option<Uuid>,
    pub source_url: String,
    pub title: Option<String>,
    pub state: JobState,
    /// Non-null exactly when `state` is `Completed`.
    pub transcript_text: Option<String>,
    pub duration_seconds: Option<f64>,
    pub word_count: Option<i32>,
    pub accuracy_percent: Option<f64>,
    pub processing_time_seconds: Option<f64>,
    pub failure_reason: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl Job {
    pub fn new(owner_id: Option<Uuid>, source_url: &str, title: String) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            source_url: source_url.to_string(),
            title: Some(title),
            state: JobState::Pending,
            transcript_text: None,
            duration_seconds: None,
            word_count: None,
            accuracy_percent: None,
            processing_time_seconds: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Transcript fields reported by the worker on a successful run.
#[derive(Debug, Clone, Default)]
pub struct TranscriptionResult {
    pub transcript: String,
    pub duration_seconds: Option<f64>,
    pub word_count: Option<i32>,
    pub accuracy_percent: Option<f64>,
    pub processing_time_seconds: Option<f64>,
}
