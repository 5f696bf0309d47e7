use anyhow::{anyhow, Result};
use lapin::{
    options::*, types::FieldTable, BasicProperties, Channel, Connection,
    ConnectionProperties,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::{PublishError, QueuePublisher};
use crate::modules::job::events::TranscriptionTask;

#[derive(Clone)]
pub struct RabbitMqService {
    queue_name: String,
    conn: Arc<Mutex<Connection>>,
    channel: Arc<Mutex<Channel>>,
}

impl RabbitMqService {
    async fn connect(url: &str) -> Result<(Connection, Channel)> {
        info!("Connecting to RabbitMQ at {}", url);
        let conn = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow!("Failed to connect to RabbitMQ: {}", e))?;

        let channel = conn
            .create_channel()
            .await
            .map_err(|e| anyhow!("Failed to create channel: {}", e))?;

        info!("Connected to RabbitMQ");
        Ok((conn, channel))
    }

    pub async fn new(url: &str, queue_name: &str) -> Result<Self> {
        let (conn, channel) = Self::connect(url).await?;

        Ok(Self {
            queue_name: queue_name.to_string(),
            conn: Arc::new(Mutex::new(conn)),
            channel: Arc::new(Mutex::new(channel)),
        })
    }

    async fn publish_bytes(&self, payload: &[u8]) -> Result<(), PublishError> {
        let channel = self.channel.lock().await;

        // Ensure queue exists
        channel
            .queue_declare(
                &self.queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| PublishError::Transport(format!("queue declare failed: {}", e)))?;

        channel
            .basic_publish(
                "",
                &self.queue_name,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_delivery_mode(2), // Persistent
            )
            .await
            .map_err(|e| PublishError::Transport(format!("publish failed: {}", e)))?
            .await
            .map_err(|e| PublishError::Transport(format!("publish unconfirmed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl QueuePublisher for RabbitMqService {
    // No internal retry: a transport failure surfaces to the caller, which
    // fails the job rather than risking a duplicate enqueue downstream.
    async fn enqueue(&self, task: &TranscriptionTask) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(task)
            .map_err(|e| PublishError::Serialize(e.to_string()))?;
        self.publish_bytes(&payload).await
    }
}
