//! Platform service: configuration and the admin dashboard aggregates.

use async_trait::async_trait;
use mockall::automock;

use reelcart::{
    config::PlatformConfig,
    users::Role,
    videos::VideoStatus,
    withdrawals::WithdrawalStatus,
};

use crate::{domain::platform::errors::PlatformServiceError, storage::Slot, store::Store};

/// Settings applied together by a config save. Revenue is not part of the
/// update — it only moves through ad submissions.
#[derive(Debug, Clone)]
pub struct PlatformConfigUpdate {
    /// Platform commission on sales, in percent.
    pub platform_fee_percent: u8,

    /// Price of one ad submission, in minor units.
    pub ad_price: u64,

    /// Payout identifier creators transfer ad fees to.
    pub admin_pix_key: String,
}

/// Admin dashboard aggregates over the whole state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStats {
    /// Registered users, all roles.
    pub total_users: usize,

    /// Users with the creator role.
    pub total_creators: usize,

    /// Free ads consumed across all users.
    pub free_ads_used_total: u64,

    /// Videos awaiting moderation.
    pub pending_videos: usize,

    /// Withdrawal requests awaiting a decision.
    pub pending_withdrawals: usize,

    /// All orders ever placed.
    pub total_orders: usize,

    /// Recognized platform revenue, in minor units.
    pub total_revenue: u64,
}

#[derive(Debug, Clone)]
pub struct StorePlatformService {
    store: Store,
}

impl StorePlatformService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlatformService for StorePlatformService {
    async fn config(&self) -> PlatformConfig {
        self.store.read(|state| state.config.clone())
    }

    async fn save_config(
        &self,
        update: PlatformConfigUpdate,
    ) -> Result<PlatformConfig, PlatformServiceError> {
        if update.platform_fee_percent > 100 {
            return Err(PlatformServiceError::InvalidFee);
        }

        self.store.try_mutate(
            &[Slot::PlatformFee, Slot::AdPrice, Slot::AdminPixKey],
            |state| {
                state.config.platform_fee_percent = update.platform_fee_percent;
                state.config.ad_price = update.ad_price;
                state.config.admin_pix_key = update.admin_pix_key;

                Ok(state.config.clone())
            },
        )
    }

    async fn stats(&self) -> PlatformStats {
        self.store.read(|state| PlatformStats {
            total_users: state.users.len(),
            total_creators: state
                .users
                .iter()
                .filter(|user| user.role == Role::Creator)
                .count(),
            free_ads_used_total: state
                .users
                .iter()
                .map(|user| u64::from(user.free_ads_used))
                .sum(),
            pending_videos: state
                .videos
                .iter()
                .filter(|video| video.status == VideoStatus::PendingPayment)
                .count(),
            pending_withdrawals: state
                .withdrawals
                .iter()
                .filter(|request| request.status == WithdrawalStatus::Pending)
                .count(),
            total_orders: state.orders.len(),
            total_revenue: state.config.total_revenue,
        })
    }
}

#[automock]
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// The current configuration snapshot.
    async fn config(&self) -> PlatformConfig;

    /// Apply a configuration update atomically.
    async fn save_config(
        &self,
        update: PlatformConfigUpdate,
    ) -> Result<PlatformConfig, PlatformServiceError>;

    /// Aggregates for the admin dashboard.
    async fn stats(&self) -> PlatformStats;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::videos::VideosService,
        test::{TestContext, new_video, register_creator},
    };

    use super::*;

    #[tokio::test]
    async fn save_config_applies_all_fields_at_once() -> TestResult {
        let ctx = TestContext::new();

        let config = ctx
            .platform
            .save_config(PlatformConfigUpdate {
                platform_fee_percent: 12,
                ad_price: 75,
                admin_pix_key: "platform@pix.example".to_string(),
            })
            .await?;

        assert_eq!(config.platform_fee_percent, 12);
        assert_eq!(config.ad_price, 75);
        assert_eq!(config.admin_pix_key, "platform@pix.example");

        Ok(())
    }

    #[tokio::test]
    async fn save_config_rejects_fees_above_100_percent() {
        let ctx = TestContext::new();

        let result = ctx
            .platform
            .save_config(PlatformConfigUpdate {
                platform_fee_percent: 101,
                ad_price: 50,
                admin_pix_key: String::new(),
            })
            .await;

        assert_eq!(result.err(), Some(PlatformServiceError::InvalidFee));
    }

    #[tokio::test]
    async fn save_config_does_not_touch_revenue() -> TestResult {
        let ctx = TestContext::new();
        register_creator(&ctx, "ana@example.com", "Ana").await?;

        ctx.videos.publish(new_video(100)).await?;
        let revenue = ctx.platform.config().await.total_revenue;
        assert!(revenue > 0);

        ctx.platform
            .save_config(PlatformConfigUpdate {
                platform_fee_percent: 15,
                ad_price: 99,
                admin_pix_key: String::new(),
            })
            .await?;

        assert_eq!(ctx.platform.config().await.total_revenue, revenue);

        Ok(())
    }

    #[tokio::test]
    async fn stats_aggregate_across_the_state() -> TestResult {
        let ctx = TestContext::new();
        register_creator(&ctx, "ana@example.com", "Ana").await?;

        ctx.videos.publish(new_video(100)).await?;
        ctx.videos.publish(new_video(200)).await?;

        let stats = ctx.platform.stats().await;

        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_creators, 1);
        assert_eq!(stats.free_ads_used_total, 2);
        assert_eq!(stats.pending_videos, 2);
        assert_eq!(stats.pending_withdrawals, 0);
        assert_eq!(stats.total_orders, 0);

        Ok(())
    }
}
