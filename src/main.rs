use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod middleware;
mod modules;
mod routes;
mod state;
mod workers;

use config::settings::AppConfig;
use infrastructure::db::pool::{connect_to_db, run_migrations};
use infrastructure::queue::rabbitmq::RabbitMqService;
use infrastructure::redis::client::RedisService;
use modules::account::repository::PgAccountStore;
use modules::job::repository::PgJobStore;
use modules::job::service::JobService;
use modules::job::title::HttpTitleResolver;
use modules::notification::service::NotificationService;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new().expect("Missing required environment variables");

    let db = connect_to_db(&config.database_url)
        .await
        .expect("Failed to connect to PostgreSQL");
    run_migrations(&db).await.expect("Failed to run migrations");
    let redis = RedisService::new(&config.redis_url)
        .await
        .expect("Failed to connect to Redis");
    let queue = RabbitMqService::new(&config.amqp_url, &config.transcription_queue)
        .await
        .expect("Failed to connect to RabbitMQ");

    let notifications = NotificationService::new(db.clone(), redis);
    let accounts = Arc::new(PgAccountStore::new(db.clone()));
    let jobs = Arc::new(JobService::new(
        Arc::new(PgJobStore::new(db.clone())),
        accounts.clone(),
        Arc::new(queue),
        Arc::new(HttpTitleResolver::new(Duration::from_secs(
            config.title_timeout_secs,
        ))),
        Arc::new(notifications.clone()),
        config.public_base_url.clone(),
    ));

    let state = AppState::new(config.clone(), db, jobs, accounts, notifications);

    tokio::spawn(workers::reaper::start_stale_job_reaper(state.clone()));

    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server port");
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.unwrap();
}
