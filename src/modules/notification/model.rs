use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Completed,
    Failed,
    System,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: NotificationKind,
    pub job_id: Option<Uuid>,
    pub title: String,
    pub detail: Option<String>,
    pub read: bool,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

impl Notification {
    pub fn new(
        account_id: Uuid,
        kind: NotificationKind,
        job_id: Uuid,
        title: &str,
        detail: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            kind,
            job_id: Some(job_id),
            title: title.to_string(),
            detail: detail.map(|d| d.to_string()),
            read: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
