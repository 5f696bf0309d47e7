use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::AccountUsage;

/// Usage accounting surface. Read by the quota gate; written only by the
/// orchestrator's completed transition.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_usage(&self, id: Uuid) -> Result<Option<AccountUsage>>;
    async fn increment_usage(&self, id: Uuid) -> Result<()>;
}

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_usage(&self, id: Uuid) -> Result<Option<AccountUsage>> {
        let usage = sqlx::query_as::<_, AccountUsage>(
            "SELECT subscription_tier, jobs_used FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(usage)
    }

    async fn increment_usage(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE accounts SET jobs_used = jobs_used + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
