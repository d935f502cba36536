//! Platform-wide configuration and the revenue accumulator.

use serde::{Deserialize, Serialize};

/// Process-wide platform settings, applied atomically as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Platform commission on sales, in percent.
    pub platform_fee_percent: u8,

    /// Price of one ad submission, in minor units.
    pub ad_price: u64,

    /// Payout identifier creators transfer ad fees to.
    pub admin_pix_key: String,

    /// Running total of recognized platform revenue, in minor units.
    /// Recognized at ad submission, regardless of the moderation outcome.
    pub total_revenue: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform_fee_percent: 10,
            ad_price: 50,
            admin_pix_key: String::new(),
            total_revenue: 0,
        }
    }
}

impl PlatformConfig {
    /// Recognize one ad submission's revenue.
    pub fn recognize_ad_revenue(&mut self) {
        self.total_revenue = self.total_revenue.saturating_add(self.ad_price);
    }
}
