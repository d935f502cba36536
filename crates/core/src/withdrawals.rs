//! Withdrawal requests: pessimistic balance reservations.
//!
//! The amount leaves the user's balance when the request is created.
//! Rejecting a still-pending request refunds it; approving performs no
//! further balance change. Either way the request is resolved exactly
//! once — reprocessing is a no-op.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{ids::TypedUuid, users::UserId};

/// Withdrawal UUID
pub type WithdrawalId = TypedUuid<WithdrawalRequest>;

/// Lifecycle of a withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    /// Balance reserved; awaiting an admin decision.
    Pending,
    /// Paid out. Terminal; the balance was already deducted.
    Approved,
    /// Declined. Terminal; the reservation was refunded.
    Rejected,
}

/// An admin's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalDecision {
    /// Pay the request out.
    Approve,
    /// Decline and refund the reservation.
    Reject,
}

/// A creator's request to withdraw part of their balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Unique request identifier.
    pub id: WithdrawalId,

    /// Requesting user.
    pub user_id: UserId,

    /// Requesting user's display name at request time.
    pub user_name: String,

    /// Reserved amount in minor units.
    pub amount: u64,

    /// Resolution state.
    pub status: WithdrawalStatus,

    /// Payout key snapshotted at request time.
    pub pix_key: String,

    /// Request timestamp.
    pub created_at: Timestamp,
}

impl WithdrawalRequest {
    /// Apply a decision to this request.
    ///
    /// Returns `true` when the request was pending and is now resolved;
    /// `false` when it had already been resolved (no state change — the
    /// caller must not move any money in that case).
    pub fn resolve(&mut self, decision: WithdrawalDecision) -> bool {
        if self.status != WithdrawalStatus::Pending {
            return false;
        }

        self.status = match decision {
            WithdrawalDecision::Approve => WithdrawalStatus::Approved,
            WithdrawalDecision::Reject => WithdrawalStatus::Rejected,
        };

        true
    }
}
