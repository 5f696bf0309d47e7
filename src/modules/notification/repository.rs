use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::Notification;

pub struct NotificationRepository;

impl NotificationRepository {
    pub async fn insert(pool: &PgPool, n: &Notification) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, account_id, kind, job_id, title, detail, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(n.id)
        .bind(n.account_id)
        .bind(n.kind)
        .bind(n.job_id)
        .bind(&n.title)
        .bind(&n.detail)
        .bind(n.read)
        .bind(n.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn list_recent(pool: &PgPool, account_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE account_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn unread_count(pool: &PgPool, account_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE account_id = $1 AND read = FALSE",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await?;
        Ok(count.0)
    }

    /// Returns false when the notification does not exist or belongs to
    /// another account.
    pub async fn mark_read(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_all_read(pool: &PgPool, account_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE account_id = $1 AND read = FALSE",
        )
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
