use serde::Deserialize;
use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub redis_url: String,
    pub amqp_url: String,
    pub transcription_queue: String,
    pub jwt_secret: String,
    pub webhook_secret: String,
    /// Externally reachable base URL, used to build webhook callback
    /// addresses handed to the worker pool.
    pub public_base_url: String,
    pub title_timeout_secs: u64,
    /// Jobs stuck in `processing` longer than this are swept to `failed`.
    /// Zero disables the reaper.
    pub stale_job_hours: u64,
    pub reaper_interval_secs: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            redis_url: env::get(EnvKey::RedisUrl)?,
            amqp_url: env::get(EnvKey::AmqpUrl)?,
            transcription_queue: env::get_or(EnvKey::TranscriptionQueue, "transcription_tasks"),
            jwt_secret: env::get(EnvKey::JwtSecret)?,
            webhook_secret: env::get(EnvKey::WebhookSecret)?,
            public_base_url: env::get_or(EnvKey::PublicBaseUrl, "http://localhost:3000"),
            title_timeout_secs: env::get_parsed(EnvKey::TitleTimeoutSecs, 3),
            stale_job_hours: env::get_parsed(EnvKey::StaleJobHours, 6),
            reaper_interval_secs: env::get_parsed(EnvKey::ReaperIntervalSecs, 600),
        })
    }
}
