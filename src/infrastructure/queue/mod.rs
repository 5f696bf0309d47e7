pub mod rabbitmq;

use crate::modules::job::events::TranscriptionTask;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("queue transport error: {0}")]
    Transport(String),
    #[error("failed to serialize task: {0}")]
    Serialize(String),
}

/// Sole egress point to the external worker pool.
#[async_trait::async_trait]
pub trait QueuePublisher: Send + Sync {
    async fn enqueue(&self, task: &TranscriptionTask) -> Result<(), PublishError>;
}
