use crate::modules::account::model::AccountUsage;

/// Pure tier-ceiling decision. No side effects; the orchestrator owns the
/// fail-closed handling for unknown accounts.
pub struct QuotaPolicy;

impl QuotaPolicy {
    pub fn can_create(usage: &AccountUsage) -> bool {
        match usage.subscription_tier.ceiling() {
            Some(ceiling) => usage.jobs_used < ceiling,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::model::SubscriptionTier;

    fn usage(tier: SubscriptionTier, used: i64) -> AccountUsage {
        AccountUsage {
            subscription_tier: tier,
            jobs_used: used,
        }
    }

    #[test]
    fn test_free_tier_capped_at_three() {
        assert!(QuotaPolicy::can_create(&usage(SubscriptionTier::Free, 0)));
        assert!(QuotaPolicy::can_create(&usage(SubscriptionTier::Free, 2)));
        assert!(!QuotaPolicy::can_create(&usage(SubscriptionTier::Free, 3)));
        assert!(!QuotaPolicy::can_create(&usage(SubscriptionTier::Free, 50)));
    }

    #[test]
    fn test_pro_tier_allows_same_usage_free_blocks() {
        assert!(QuotaPolicy::can_create(&usage(SubscriptionTier::Pro, 3)));
        assert!(QuotaPolicy::can_create(&usage(SubscriptionTier::Pro, 99)));
        assert!(!QuotaPolicy::can_create(&usage(SubscriptionTier::Pro, 100)));
    }

    #[test]
    fn test_enterprise_is_unlimited() {
        assert!(QuotaPolicy::can_create(&usage(SubscriptionTier::Enterprise, 1_000_000)));
    }
}
