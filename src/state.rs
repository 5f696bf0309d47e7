use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::modules::account::repository::AccountStore;
use crate::modules::job::service::JobService;
use crate::modules::notification::service::NotificationService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub jobs: Arc<JobService>,
    pub accounts: Arc<dyn AccountStore>,
    pub notifications: NotificationService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DbPool,
        jobs: Arc<JobService>,
        accounts: Arc<dyn AccountStore>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            config,
            db,
            jobs,
            accounts,
            notifications,
        }
    }
}
