//! Videos service: publishing, moderation, engagement and the feed
//! projections.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use reelcart::{
    users::UserId,
    videos::{Comment, CommentId, NewVideo, Video, VideoId, VideoStatus},
};

use crate::{
    domain::videos::errors::VideosServiceError,
    storage::Slot,
    store::Store,
};

/// Display identity used for signed-out engagement.
const GUEST_NAME: &str = "Guest";
const GUEST_AVATAR: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=guest";

/// Publishing policy for the free-ad allotment.
///
/// The default preserves the platform's advisory behavior: the free-ad
/// counter is tracked but never blocks a publish. With enforcement on, a
/// creator past the allotment must hold a paid credit, which is consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishPolicy {
    /// Whether the free-ad allotment blocks publishing once exhausted.
    pub enforce_free_limit: bool,
}

#[derive(Debug, Clone)]
pub struct StoreVideosService {
    store: Store,
    policy: PublishPolicy,
}

impl StoreVideosService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self::with_policy(store, PublishPolicy::default())
    }

    #[must_use]
    pub fn with_policy(store: Store, policy: PublishPolicy) -> Self {
        Self { store, policy }
    }
}

#[async_trait]
impl VideosService for StoreVideosService {
    async fn publish(&self, new: NewVideo) -> Result<Video, VideosServiceError> {
        let policy = self.policy;

        self.store.try_mutate(
            &[Slot::Users, Slot::Session, Slot::Videos, Slot::TotalRevenue],
            |state| {
                let session = state.session.clone().ok_or(VideosServiceError::NoSession)?;
                let owner = state.find_user(session.id).cloned().unwrap_or(session);

                let consume_credit = if policy.enforce_free_limit
                    && owner.free_allotment_exhausted()
                {
                    if owner.paid_credits == 0 {
                        return Err(VideosServiceError::FreeLimitReached);
                    }
                    true
                } else {
                    false
                };

                let video = Video::publish(new, &owner, Timestamp::now());

                // Best-effort: a dangling session (owner row deleted)
                // still publishes.
                let _counters = state.update_user(owner.id, |u| {
                    u.record_ad_created();
                    if consume_credit {
                        u.paid_credits = u.paid_credits.saturating_sub(1);
                    }
                });

                // Revenue is recognized at submission, regardless of the
                // later moderation outcome.
                state.config.recognize_ad_revenue();

                state.videos.insert(0, video.clone());

                Ok(video)
            },
        )
    }

    async fn approve(&self, id: VideoId) -> Result<Video, VideosServiceError> {
        self.store.try_mutate(&[Slot::Videos], |state| {
            let video = find_video_mut(&mut state.videos, id)?;
            video.approve()?;
            Ok(video.clone())
        })
    }

    async fn reject(
        &self,
        id: VideoId,
        reason: Option<String>,
    ) -> Result<Video, VideosServiceError> {
        self.store.try_mutate(&[Slot::Videos], |state| {
            let video = find_video_mut(&mut state.videos, id)?;
            video.reject(reason)?;
            Ok(video.clone())
        })
    }

    async fn block(&self, id: VideoId) -> Result<Video, VideosServiceError> {
        self.store.try_mutate(&[Slot::Videos], |state| {
            let video = find_video_mut(&mut state.videos, id)?;
            video.block()?;
            Ok(video.clone())
        })
    }

    async fn toggle_like(&self, id: VideoId) -> Result<Video, VideosServiceError> {
        self.store.try_mutate(&[Slot::Videos], |state| {
            let video = find_video_mut(&mut state.videos, id)?;
            video.like();
            Ok(video.clone())
        })
    }

    async fn add_comment(&self, id: VideoId, text: &str) -> Result<Video, VideosServiceError> {
        let text = text.trim().to_string();

        if text.is_empty() {
            return Err(VideosServiceError::EmptyComment);
        }

        self.store.try_mutate(&[Slot::Videos], |state| {
            let author = state.session.clone();
            let video = find_video_mut(&mut state.videos, id)?;

            let comment = match author {
                Some(user) => Comment {
                    id: CommentId::new(),
                    user_id: user.id,
                    username: user.name,
                    user_avatar: user.avatar,
                    text,
                    created_at: Timestamp::now(),
                },
                None => Comment {
                    id: CommentId::new(),
                    user_id: UserId::from_uuid(Uuid::nil()),
                    username: GUEST_NAME.to_string(),
                    user_avatar: GUEST_AVATAR.to_string(),
                    text,
                    created_at: Timestamp::now(),
                },
            };

            video.push_comment(comment);

            Ok(video.clone())
        })
    }

    async fn feed(&self) -> Vec<Video> {
        self.store.read(|state| {
            state
                .videos
                .iter()
                .filter(|video| video.is_live())
                .cloned()
                .collect()
        })
    }

    async fn discover(&self, query: &str) -> Vec<Video> {
        self.store.read(|state| {
            state
                .videos
                .iter()
                .filter(|video| video.is_live() && video.matches_query(query))
                .cloned()
                .collect()
        })
    }

    async fn videos_by_owner(&self, owner: UserId) -> Vec<Video> {
        self.store.read(|state| {
            state
                .videos
                .iter()
                .filter(|video| video.user_id == owner)
                .cloned()
                .collect()
        })
    }

    async fn pending(&self) -> Vec<Video> {
        self.store.read(|state| {
            state
                .videos
                .iter()
                .filter(|video| video.status == VideoStatus::PendingPayment)
                .cloned()
                .collect()
        })
    }

    async fn get(&self, id: VideoId) -> Result<Video, VideosServiceError> {
        self.store.read(|state| {
            state
                .videos
                .iter()
                .find(|video| video.id == id)
                .cloned()
                .ok_or(VideosServiceError::NotFound)
        })
    }
}

fn find_video_mut(
    videos: &mut [Video],
    id: VideoId,
) -> Result<&mut Video, VideosServiceError> {
    videos
        .iter_mut()
        .find(|video| video.id == id)
        .ok_or(VideosServiceError::NotFound)
}

#[automock]
#[async_trait]
pub trait VideosService: Send + Sync {
    /// Publish a new video as the signed-in user. The video lands in
    /// `pending_payment`, the creator's ad counters move, and the ad price
    /// is recognized as platform revenue immediately.
    async fn publish(&self, new: NewVideo) -> Result<Video, VideosServiceError>;

    /// Approve a pending video into the feed.
    async fn approve(&self, id: VideoId) -> Result<Video, VideosServiceError>;

    /// Reject a pending video, recording the reason.
    async fn reject(
        &self,
        id: VideoId,
        reason: Option<String>,
    ) -> Result<Video, VideosServiceError>;

    /// Pull an active video from the feed.
    async fn block(&self, id: VideoId) -> Result<Video, VideosServiceError>;

    /// Register one anonymous like.
    async fn toggle_like(&self, id: VideoId) -> Result<Video, VideosServiceError>;

    /// Append a comment by the signed-in user, or the guest identity.
    async fn add_comment(&self, id: VideoId, text: &str) -> Result<Video, VideosServiceError>;

    /// Active videos, newest first.
    async fn feed(&self) -> Vec<Video>;

    /// Active videos matching a discover query.
    async fn discover(&self, query: &str) -> Vec<Video>;

    /// All of a creator's videos, regardless of status.
    async fn videos_by_owner(&self, owner: UserId) -> Vec<Video>;

    /// The admin moderation queue.
    async fn pending(&self) -> Vec<Video>;

    /// Retrieve a single video.
    async fn get(&self, id: VideoId) -> Result<Video, VideosServiceError>;
}
