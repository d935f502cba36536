//! Videos service errors.

use reelcart::videos::InvalidVideoTransition;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VideosServiceError {
    #[error("video not found")]
    NotFound,

    #[error("no user is signed in")]
    NoSession,

    #[error("free ad allotment exhausted and no paid credits available")]
    FreeLimitReached,

    #[error("comment text cannot be empty")]
    EmptyComment,

    #[error(transparent)]
    Transition(#[from] InvalidVideoTransition),
}
