use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::model::TranscriptionResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJobRequest {
    #[validate(url(message = "source_url must be a valid URL"))]
    pub source_url: String,
}

/// Wire shape the external worker POSTs back. Field names are the worker's,
/// not ours, hence camelCase.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub success: bool,
    pub transcript: Option<String>,
    pub duration: Option<f64>,
    pub word_count: Option<i32>,
    pub accuracy: Option<f64>,
    pub processing_time: Option<f64>,
    pub error: Option<String>,
}

impl WebhookPayload {
    /// A success payload with no transcript counts as an empty transcript,
    /// keeping the completed-implies-transcript invariant intact.
    pub fn into_result(self) -> TranscriptionResult {
        TranscriptionResult {
            transcript: self.transcript.unwrap_or_default(),
            duration_seconds: self.duration,
            word_count: self.word_count,
            accuracy_percent: self.accuracy,
            processing_time_seconds: self.processing_time,
        }
    }
}
