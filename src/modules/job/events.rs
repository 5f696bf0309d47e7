use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message handed to the external transcription worker pool. The worker
/// reports the outcome by POSTing a signed payload to `callback_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionTask {
    pub job_id: Uuid,
    pub source_url: String,
    pub callback_url: String,
}
