use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "subscription_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    /// Per-tier job ceiling. `None` means unlimited.
    pub fn ceiling(&self) -> Option<i64> {
        match self {
            SubscriptionTier::Free => Some(3),
            SubscriptionTier::Pro => Some(100),
            SubscriptionTier::Enterprise => None,
        }
    }
}

/// The slice of an account the quota gate reads. Account rows themselves
/// (signup, billing, tier changes) are owned by the platform layer, not
/// this service; we only read usage and bump the counter on completion.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AccountUsage {
    pub subscription_tier: SubscriptionTier,
    pub jobs_used: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ceilings() {
        assert_eq!(SubscriptionTier::Free.ceiling(), Some(3));
        assert_eq!(SubscriptionTier::Pro.ceiling(), Some(100));
        assert_eq!(SubscriptionTier::Enterprise.ceiling(), None);
    }
}
