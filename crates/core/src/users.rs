//! User accounts and their financial state.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::ids::TypedUuid;

/// User UUID
pub type UserId = TypedUuid<User>;

/// Number of ads a creator may publish before paid credits apply.
pub const FREE_AD_ALLOTMENT: u32 = 3;

/// What a user is allowed to do on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular viewer/buyer.
    User,
    /// May publish videos with attached products and receive payouts.
    Creator,
    /// Operator with moderation and configuration authority.
    Admin,
}

/// Whether the account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account in good standing.
    Active,
    /// Sign-in denied; balance and history are untouched.
    Banned,
}

/// Bank-transfer payout destination details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Pix-key-equivalent payout identifier.
    pub pix_key: String,

    /// Account holder's full name.
    pub full_name: String,

    /// Optional trading name shown to buyers.
    pub company_name: String,

    /// Optional logo image URL.
    pub logo_url: Option<String>,
}

/// A user account: identity plus financial ledger fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Sign-in email; uniqueness is case-sensitive.
    pub email: String,

    /// Plaintext password. Hardening is explicitly out of scope.
    pub password: String,

    /// Avatar image URL.
    pub avatar: String,

    /// Follower counter.
    pub followers: u64,

    /// Following counter.
    pub following: u64,

    /// Platform role.
    pub role: Role,

    /// Ban state.
    pub status: AccountStatus,

    /// Withdrawable balance in minor units.
    pub balance: u64,

    /// Payout destination, when configured.
    pub payment_info: Option<PaymentInfo>,

    /// Free ads consumed; advisory once past [`FREE_AD_ALLOTMENT`].
    pub free_ads_used: u32,

    /// Prepaid ad credits granted by an admin or purchased.
    pub paid_credits: u32,

    /// Lifetime count of published ads.
    pub total_ads_created: u32,

    /// Most recent successful sign-in.
    pub last_login: Option<Timestamp>,
}

/// Registration payload.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Sign-in email.
    pub email: String,

    /// Plaintext password.
    pub password: String,

    /// Display name.
    pub name: String,

    /// Requested role; admins are provisioned out of band.
    pub role: Role,
}

impl User {
    /// Build a fresh account from a registration payload: zeroed financial
    /// fields, active status, a generated avatar and an empty payout key.
    #[must_use]
    pub fn register(account: NewAccount, now: Timestamp) -> Self {
        let avatar = format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            account.name
        );

        Self {
            id: UserId::new(),
            avatar,
            payment_info: Some(PaymentInfo {
                pix_key: String::new(),
                full_name: account.name.clone(),
                company_name: String::new(),
                logo_url: None,
            }),
            name: account.name,
            email: account.email,
            password: account.password,
            followers: 0,
            following: 0,
            role: account.role,
            status: AccountStatus::Active,
            balance: 0,
            free_ads_used: 0,
            paid_credits: 0,
            total_ads_created: 0,
            last_login: Some(now),
        }
    }

    /// Record one published ad: the lifetime counter always moves, the free
    /// counter only while below [`FREE_AD_ALLOTMENT`]. Tracking only — this
    /// never blocks a publish.
    pub fn record_ad_created(&mut self) {
        self.total_ads_created = self.total_ads_created.saturating_add(1);

        if self.free_ads_used < FREE_AD_ALLOTMENT {
            self.free_ads_used += 1;
        }
    }

    /// Whether the free allotment is exhausted.
    #[must_use]
    pub fn free_allotment_exhausted(&self) -> bool {
        self.free_ads_used >= FREE_AD_ALLOTMENT
    }

    /// The payout key to snapshot into a withdrawal request.
    #[must_use]
    pub fn payout_key(&self) -> Option<&str> {
        self.payment_info
            .as_ref()
            .map(|info| info.pix_key.as_str())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_user() -> User {
        User::register(
            NewAccount {
                email: "ana@example.com".to_string(),
                password: "secret".to_string(),
                name: "Ana".to_string(),
                role: Role::Creator,
            },
            Timestamp::UNIX_EPOCH,
        )
    }

    #[test]
    fn register_zeroes_financial_fields() {
        let user = fresh_user();

        assert_eq!(user.balance, 0);
        assert_eq!(user.free_ads_used, 0);
        assert_eq!(user.paid_credits, 0);
        assert_eq!(user.total_ads_created, 0);
        assert_eq!(user.status, AccountStatus::Active);
    }

    #[test]
    fn record_ad_created_caps_free_counter() {
        let mut user = fresh_user();

        for _ in 0..5 {
            user.record_ad_created();
        }

        assert_eq!(user.total_ads_created, 5);
        assert_eq!(user.free_ads_used, FREE_AD_ALLOTMENT);
        assert!(user.free_allotment_exhausted());
    }

    #[test]
    fn payout_key_requires_nonempty_pix_key() {
        let mut user = fresh_user();

        assert_eq!(user.payout_key(), None);

        if let Some(info) = user.payment_info.as_mut() {
            info.pix_key = "ana@pix.example".to_string();
        }

        assert_eq!(user.payout_key(), Some("ana@pix.example"));
    }
}
