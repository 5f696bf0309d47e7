use serde::Serialize;
use utoipa::ToSchema;

use super::model::SubscriptionTier;

#[derive(Debug, Serialize, ToSchema)]
pub struct UsageResponse {
    pub subscription_tier: SubscriptionTier,
    pub jobs_used: i64,
    /// Absent for unlimited tiers.
    pub jobs_allowed: Option<i64>,
}
