//! Demo fixtures: a seeded creator, one live video with a product card
//! and a platform config, used by the `seed` CLI command and tests.

use jiff::Timestamp;

use crate::{
    config::PlatformConfig,
    products::{Product, ProductId},
    users::{AccountStatus, PaymentInfo, Role, User, UserId},
    videos::{Video, VideoId, VideoStatus},
};

/// The demo creator account that owns the seeded video.
#[must_use]
pub fn demo_creator(now: Timestamp) -> User {
    User {
        id: UserId::new(),
        name: "Runner Pro Shop".to_string(),
        email: "runner@example.com".to_string(),
        password: "123".to_string(),
        avatar: "https://picsum.photos/seed/runner/100".to_string(),
        followers: 1_200,
        following: 50,
        role: Role::Creator,
        status: AccountStatus::Active,
        balance: 0,
        payment_info: Some(PaymentInfo {
            pix_key: "runner@pix.example".to_string(),
            full_name: "Runner Sports LTDA".to_string(),
            company_name: "Runner Pro".to_string(),
            logo_url: None,
        }),
        free_ads_used: 1,
        paid_credits: 0,
        total_ads_created: 1,
        last_login: Some(now),
    }
}

/// A live demo video owned by the given creator, with a product card.
#[must_use]
pub fn demo_video(owner: &User, now: Timestamp) -> Video {
    Video {
        id: VideoId::new(),
        url: "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4"
            .to_string(),
        thumbnail: "https://picsum.photos/seed/1/400/800".to_string(),
        description: "These new sneakers are absolute fire! 🔥 #running #fitness".to_string(),
        likes: 1_240,
        comments: 0,
        comments_list: Vec::new(),
        shares: 12,
        username: "runner_pro".to_string(),
        user_id: owner.id,
        user_avatar: owner.avatar.clone(),
        product: Some(Product {
            id: ProductId::new(),
            name: "Speedster X 5000".to_string(),
            brand: Some("Speedster".to_string()),
            price: 12_999,
            description: "Ultra-light shoes for professionals.".to_string(),
            image: "https://picsum.photos/seed/shoe/200".to_string(),
            affiliate_commission: 15,
            product_url: Some("https://example.com/shoe".to_string()),
            rating: 48,
            reviews: 342,
            seller_id: owner.id,
        }),
        category: "Sports".to_string(),
        tags: vec!["running".to_string(), "fitness".to_string()],
        status: VideoStatus::Active,
        sales_count: 45,
        rejection_reason: None,
        created_at: now,
    }
}

/// The seeded platform configuration.
#[must_use]
pub fn demo_config() -> PlatformConfig {
    PlatformConfig {
        platform_fee_percent: 10,
        ad_price: 50,
        admin_pix_key: "725f4b23-a169-45b0-b8fb-57d7a6811560".to_string(),
        total_revenue: 4_582_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_video_belongs_to_demo_creator() {
        let creator = demo_creator(Timestamp::UNIX_EPOCH);
        let video = demo_video(&creator, Timestamp::UNIX_EPOCH);

        assert_eq!(video.user_id, creator.id);
        assert!(video.is_live());
        assert_eq!(
            video.product.map(|p| p.seller_id),
            Some(creator.id),
        );
    }
}
