use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    RedisUrl,
    AmqpUrl,
    TranscriptionQueue,
    JwtSecret,
    WebhookSecret,
    PublicBaseUrl,
    TitleTimeoutSecs,
    StaleJobHours,
    ReaperIntervalSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::RedisUrl => "REDIS_URL",
            EnvKey::AmqpUrl => "AMQP_URL",
            EnvKey::TranscriptionQueue => "TRANSCRIPTION_QUEUE",
            EnvKey::JwtSecret => "JWT_SECRET",
            EnvKey::WebhookSecret => "WEBHOOK_SECRET",
            EnvKey::PublicBaseUrl => "PUBLIC_BASE_URL",
            EnvKey::TitleTimeoutSecs => "TITLE_TIMEOUT_SECS",
            EnvKey::StaleJobHours => "STALE_JOB_HOURS",
            EnvKey::ReaperIntervalSecs => "REAPER_INTERVAL_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
