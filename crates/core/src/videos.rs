//! Videos: the feed posts creators publish, and their moderation
//! state machine.
//!
//! Transitions are authoritative: `pending_payment → {active, rejected}`
//! and `active → blocked`. Re-applying the status a video already holds is
//! an idempotent no-op; everything else is a typed error. `rejected` and
//! `blocked` are terminal — no un-block path is exposed.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::TypedUuid,
    products::{Product, ProductId},
    users::{User, UserId},
};

/// Video UUID
pub type VideoId = TypedUuid<Video>;

/// Comment UUID
pub type CommentId = TypedUuid<Comment>;

/// Moderation status of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Submitted; awaiting payment verification and admin approval.
    PendingPayment,
    /// Approved and visible in the feed.
    Active,
    /// Declined by an admin. Terminal.
    Rejected,
    /// Pulled from the feed by an admin. Terminal.
    Blocked,
}

/// A video status change that the state machine does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("video cannot move from {from:?} to {to:?}")]
pub struct InvalidVideoTransition {
    /// Status the video currently holds.
    pub from: VideoStatus,
    /// Status that was requested.
    pub to: VideoStatus,
}

/// A viewer comment, with the author identity snapshotted at post time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,

    /// Author's user id, or the guest sentinel.
    pub user_id: UserId,

    /// Author display name at post time.
    pub username: String,

    /// Author avatar at post time.
    pub user_avatar: String,

    /// Comment body.
    pub text: String,

    /// Post timestamp.
    pub created_at: Timestamp,
}

/// A feed post with an optional attached product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Unique video identifier.
    pub id: VideoId,

    /// Playback URL.
    pub url: String,

    /// Thumbnail URL.
    pub thumbnail: String,

    /// Caption text.
    pub description: String,

    /// Anonymous like counter; likes are not tracked per viewer.
    pub likes: u64,

    /// Comment counter; tracks `comments_list` length.
    pub comments: u64,

    /// Append-only comment list.
    pub comments_list: Vec<Comment>,

    /// Share counter.
    pub shares: u64,

    /// Owner's username snapshot.
    pub username: String,

    /// Owning creator.
    pub user_id: UserId,

    /// Owner's avatar snapshot.
    pub user_avatar: String,

    /// Attached product card, if any.
    pub product: Option<Product>,

    /// Discover category.
    pub category: String,

    /// Free-form tags.
    pub tags: Vec<String>,

    /// Moderation status.
    pub status: VideoStatus,

    /// Sales attributed to this video.
    pub sales_count: u32,

    /// Reason recorded when rejected.
    pub rejection_reason: Option<String>,

    /// Submission timestamp.
    pub created_at: Timestamp,
}

/// Upload payload for a new video.
#[derive(Debug, Clone)]
pub struct NewVideo {
    /// Playback URL.
    pub url: String,

    /// Thumbnail URL.
    pub thumbnail: String,

    /// Caption text.
    pub description: String,

    /// Discover category.
    pub category: String,

    /// Free-form tags.
    pub tags: Vec<String>,

    /// Product card details, when the video sells something.
    pub product: Option<NewProductCard>,
}

/// Product card details supplied at upload time. The seller and product
/// identity are filled in at publish.
#[derive(Debug, Clone)]
pub struct NewProductCard {
    /// Product name.
    pub name: String,

    /// Optional brand name.
    pub brand: Option<String>,

    /// Unit price in minor units.
    pub price: u64,

    /// Sales copy.
    pub description: String,

    /// Image URL.
    pub image: String,

    /// Optional external product page.
    pub product_url: Option<String>,
}

impl Video {
    /// Build a `pending_payment` video from an upload payload, snapshotting
    /// the owner's identity and stamping the owner as seller of the
    /// attached product.
    #[must_use]
    pub fn publish(new: NewVideo, owner: &User, now: Timestamp) -> Self {
        let username = owner.name.to_lowercase().replace(' ', "_");

        let product = new.product.map(|card| Product {
            id: ProductId::new(),
            name: card.name,
            brand: card.brand,
            price: card.price,
            description: card.description,
            image: card.image,
            affiliate_commission: 10,
            product_url: card.product_url,
            rating: 50,
            reviews: 0,
            seller_id: owner.id,
        });

        Self {
            id: VideoId::new(),
            url: new.url,
            thumbnail: new.thumbnail,
            description: new.description,
            likes: 0,
            comments: 0,
            comments_list: Vec::new(),
            shares: 0,
            username,
            user_id: owner.id,
            user_avatar: owner.avatar.clone(),
            product,
            category: new.category,
            tags: new.tags,
            status: VideoStatus::PendingPayment,
            sales_count: 0,
            rejection_reason: None,
            created_at: now,
        }
    }

    /// Approve a pending video into the feed.
    ///
    /// Returns `false` when the video was already active (idempotent no-op).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVideoTransition`] when the video is rejected or
    /// blocked.
    pub fn approve(&mut self) -> Result<bool, InvalidVideoTransition> {
        self.step(VideoStatus::Active)
    }

    /// Reject a pending video, recording the reason.
    ///
    /// Returns `false` when the video was already rejected; the originally
    /// recorded reason is kept.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVideoTransition`] when the video is active or
    /// blocked.
    pub fn reject(&mut self, reason: Option<String>) -> Result<bool, InvalidVideoTransition> {
        let changed = self.step(VideoStatus::Rejected)?;

        if changed {
            self.rejection_reason = reason;
        }

        Ok(changed)
    }

    /// Pull an active video from the feed.
    ///
    /// Returns `false` when the video was already blocked. Blocking is only
    /// reachable from `active`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVideoTransition`] when the video is pending or
    /// rejected.
    pub fn block(&mut self) -> Result<bool, InvalidVideoTransition> {
        self.step(VideoStatus::Blocked)
    }

    fn step(&mut self, to: VideoStatus) -> Result<bool, InvalidVideoTransition> {
        if self.status == to {
            return Ok(false);
        }

        let allowed = matches!(
            (self.status, to),
            (
                VideoStatus::PendingPayment,
                VideoStatus::Active | VideoStatus::Rejected
            ) | (VideoStatus::Active, VideoStatus::Blocked)
        );

        if !allowed {
            return Err(InvalidVideoTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;

        Ok(true)
    }

    /// Register one anonymous like.
    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    /// Append a comment and bump the counter.
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments_list.push(comment);
        self.comments = self.comments.saturating_add(1);
    }

    /// Whether this video shows in the public feed.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status == VideoStatus::Active
    }

    /// Case-insensitive match against description, category and tags,
    /// used by the discover grid.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();

        if needle.is_empty() {
            return true;
        }

        self.description.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pending_video() -> Video {
        Video {
            id: VideoId::new(),
            url: "https://cdn.example/v/1.mp4".to_string(),
            thumbnail: "https://cdn.example/t/1.jpg".to_string(),
            description: "New running shoes drop 🔥".to_string(),
            likes: 0,
            comments: 0,
            comments_list: Vec::new(),
            shares: 0,
            username: "runner_pro".to_string(),
            user_id: UserId::new(),
            user_avatar: "https://cdn.example/a/1.png".to_string(),
            product: None,
            category: "Sports".to_string(),
            tags: vec!["running".to_string(), "fitness".to_string()],
            status: VideoStatus::PendingPayment,
            sales_count: 0,
            rejection_reason: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn approve_moves_pending_to_active() -> TestResult {
        let mut video = pending_video();

        assert!(video.approve()?);
        assert_eq!(video.status, VideoStatus::Active);

        Ok(())
    }

    #[test]
    fn approve_is_idempotent_on_active() -> TestResult {
        let mut video = pending_video();

        video.approve()?;

        assert!(!video.approve()?);
        assert_eq!(video.status, VideoStatus::Active);

        Ok(())
    }

    #[test]
    fn reject_records_reason_once() -> TestResult {
        let mut video = pending_video();

        video.reject(Some("payment not found".to_string()))?;

        assert_eq!(video.status, VideoStatus::Rejected);
        assert_eq!(video.rejection_reason.as_deref(), Some("payment not found"));

        // A second reject is a no-op and keeps the original reason.
        assert!(!video.reject(Some("other".to_string()))?);
        assert_eq!(video.rejection_reason.as_deref(), Some("payment not found"));

        Ok(())
    }

    #[test]
    fn block_requires_active() {
        let mut video = pending_video();

        let result = video.block();

        assert_eq!(
            result,
            Err(InvalidVideoTransition {
                from: VideoStatus::PendingPayment,
                to: VideoStatus::Blocked,
            })
        );
    }

    #[test]
    fn blocked_video_cannot_be_reapproved() -> TestResult {
        let mut video = pending_video();

        video.approve()?;
        video.block()?;

        let result = video.approve();

        assert_eq!(
            result,
            Err(InvalidVideoTransition {
                from: VideoStatus::Blocked,
                to: VideoStatus::Active,
            })
        );

        Ok(())
    }

    #[test]
    fn rejected_is_terminal() -> TestResult {
        let mut video = pending_video();

        video.reject(None)?;

        assert!(video.approve().is_err());
        assert!(video.block().is_err());

        Ok(())
    }

    #[test]
    fn push_comment_tracks_counter() {
        let mut video = pending_video();

        video.push_comment(Comment {
            id: CommentId::new(),
            user_id: UserId::new(),
            username: "ana".to_string(),
            user_avatar: String::new(),
            text: "where do I buy this?".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        });

        assert_eq!(video.comments, 1);
        assert_eq!(video.comments_list.len(), 1);
    }

    #[test]
    fn matches_query_is_case_insensitive() {
        let video = pending_video();

        assert!(video.matches_query("RUNNING"));
        assert!(video.matches_query("sports"));
        assert!(video.matches_query("shoes"));
        assert!(!video.matches_query("kitchen"));
    }
}
