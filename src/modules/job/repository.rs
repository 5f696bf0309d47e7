use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::{Job, TranscriptionResult};

/// The only mutation path for job rows. Transition methods are
/// compare-and-set: the guard in the WHERE clause makes each per-job
/// transition linearizable at the row level, so concurrent webhook
/// deliveries race safely. A transition returning `None` means the guard
/// did not match (row absent or already terminal) and the caller re-reads
/// to tell the two apart.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<Job>>;
    async fn list_for_owner(&self, owner_id: Uuid, limit: i64) -> Result<Vec<Job>>;
    /// CAS `pending -> processing`.
    async fn mark_processing(&self, id: Uuid) -> Result<Option<Job>>;
    /// CAS `{pending, processing} -> completed`, storing the result fields.
    /// Completion straight from `pending` is legal: a webhook can land
    /// before submit's own bookkeeping finishes.
    async fn mark_completed(&self, id: Uuid, result: &TranscriptionResult) -> Result<Option<Job>>;
    /// CAS `{pending, processing} -> failed`.
    async fn mark_failed(&self, id: Uuid, reason: Option<&str>) -> Result<Option<Job>>;
    /// Jobs stuck in `processing` whose last transition predates `cutoff`.
    async fn stale_processing(&self, cutoff: OffsetDateTime) -> Result<Vec<Job>>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn insert(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, owner_id, source_url, title, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6)
            "#,
        )
        .bind(job.id)
        .bind(job.owner_id)
        .bind(&job.source_url)
        .bind(&job.title)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list_for_owner(&self, owner_id: Uuid, limit: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn mark_processing(&self, id: Uuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET state = 'processing', updated_at = NOW()
            WHERE id = $1 AND state = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn mark_completed(&self, id: Uuid, result: &TranscriptionResult) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                state = 'completed',
                transcript_text = $2,
                duration_seconds = $3,
                word_count = $4,
                accuracy_percent = $5,
                processing_time_seconds = $6,
                updated_at = NOW()
            WHERE id = $1 AND state IN ('pending', 'processing')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&result.transcript)
        .bind(result.duration_seconds)
        .bind(result.word_count)
        .bind(result.accuracy_percent)
        .bind(result.processing_time_seconds)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn mark_failed(&self, id: Uuid, reason: Option<&str>) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET state = 'failed', failure_reason = $2, updated_at = NOW()
            WHERE id = $1 AND state IN ('pending', 'processing')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn stale_processing(&self, cutoff: OffsetDateTime) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE state = 'processing' AND updated_at < $1",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }
}
