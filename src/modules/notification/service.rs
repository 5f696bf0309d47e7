use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::model::{Notification, NotificationKind};
use super::repository::NotificationRepository;
use crate::infrastructure::redis::client::RedisService;

const UNREAD_CACHE_TTL_SECS: u64 = 60;

/// Records a user-visible event when a job reaches a terminal state.
/// Infallible from the caller's perspective: a notification that cannot be
/// written must never fail the lifecycle transition that triggered it.
#[async_trait]
pub trait NotificationEmitter: Send + Sync {
    async fn emit(
        &self,
        account_id: Uuid,
        kind: NotificationKind,
        job_id: Uuid,
        title: &str,
        detail: Option<&str>,
    );
}

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    redis: RedisService,
}

impl NotificationService {
    pub fn new(pool: PgPool, redis: RedisService) -> Self {
        Self { pool, redis }
    }

    fn unread_key(account_id: Uuid) -> String {
        format!("notifications:unread:{}", account_id)
    }

    async fn invalidate_unread(&self, account_id: Uuid) {
        if let Err(e) = self.redis.delete(&Self::unread_key(account_id)).await {
            warn!("failed to invalidate unread cache for {}: {}", account_id, e);
        }
    }

    pub async fn list_recent(&self, account_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        NotificationRepository::list_recent(&self.pool, account_id, limit).await
    }

    /// Unread count, served from redis when warm. Cache misses fall through
    /// to the database and repopulate with a short TTL.
    pub async fn unread_count(&self, account_id: Uuid) -> Result<i64> {
        let key = Self::unread_key(account_id);

        if let Ok(Some(count)) = self.redis.get_counter(&key).await {
            return Ok(count);
        }

        let count = NotificationRepository::unread_count(&self.pool, account_id).await?;

        if let Err(e) = self.redis.set_counter(&key, count, UNREAD_CACHE_TTL_SECS).await {
            warn!("failed to cache unread count for {}: {}", account_id, e);
        }

        Ok(count)
    }

    pub async fn mark_read(&self, account_id: Uuid, id: Uuid) -> Result<bool> {
        let updated = NotificationRepository::mark_read(&self.pool, account_id, id).await?;
        if updated {
            self.invalidate_unread(account_id).await;
        }
        Ok(updated)
    }

    pub async fn mark_all_read(&self, account_id: Uuid) -> Result<u64> {
        let updated = NotificationRepository::mark_all_read(&self.pool, account_id).await?;
        if updated > 0 {
            self.invalidate_unread(account_id).await;
        }
        Ok(updated)
    }
}

#[async_trait]
impl NotificationEmitter for NotificationService {
    async fn emit(
        &self,
        account_id: Uuid,
        kind: NotificationKind,
        job_id: Uuid,
        title: &str,
        detail: Option<&str>,
    ) {
        let notification = Notification::new(account_id, kind, job_id, title, detail);
        if let Err(e) = NotificationRepository::insert(&self.pool, &notification).await {
            warn!(
                "failed to record {:?} notification for job {} (account {}): {}",
                kind, job_id, account_id, e
            );
            return;
        }
        self.invalidate_unread(account_id).await;
    }
}
