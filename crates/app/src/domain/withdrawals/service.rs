//! Withdrawals service: pessimistic balance reservations and their
//! one-shot resolution.
//!
//! Conservation rules: requesting deducts the amount up front; rejecting
//! a pending request refunds it exactly once; approving never touches the
//! balance again. Reprocessing a resolved request is a no-op, so a double
//! reject can never double-refund.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use reelcart::withdrawals::{
    WithdrawalDecision, WithdrawalId, WithdrawalRequest, WithdrawalStatus,
};

use crate::{
    domain::withdrawals::errors::WithdrawalsServiceError,
    storage::Slot,
    store::Store,
};

/// Payout key recorded when the user has none on file.
const MISSING_PIX_KEY: &str = "no pix key on file";

#[derive(Debug, Clone)]
pub struct StoreWithdrawalsService {
    store: Store,
}

impl StoreWithdrawalsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WithdrawalsService for StoreWithdrawalsService {
    async fn request(&self, amount: u64) -> Result<WithdrawalRequest, WithdrawalsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session, Slot::Withdrawals], |state| {
                let session = state
                    .session
                    .clone()
                    .ok_or(WithdrawalsServiceError::NoSession)?;

                let user = state.find_user(session.id).cloned().unwrap_or(session);

                if amount == 0 || amount > user.balance {
                    return Err(WithdrawalsServiceError::InsufficientBalance);
                }

                let request = WithdrawalRequest {
                    id: WithdrawalId::new(),
                    user_id: user.id,
                    user_name: user.name.clone(),
                    amount,
                    status: WithdrawalStatus::Pending,
                    pix_key: user
                        .payout_key()
                        .unwrap_or(MISSING_PIX_KEY)
                        .to_string(),
                    created_at: Timestamp::now(),
                };

                // Pessimistic reservation: the balance drops now, and only
                // a rejection brings it back.
                let _reserved = state.update_user(user.id, |u| {
                    u.balance = u.balance.saturating_sub(amount);
                });

                state.withdrawals.insert(0, request.clone());

                Ok(request)
            })
    }

    async fn process(
        &self,
        id: WithdrawalId,
        decision: WithdrawalDecision,
    ) -> Result<WithdrawalRequest, WithdrawalsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session, Slot::Withdrawals], |state| {
                let request = state
                    .withdrawals
                    .iter_mut()
                    .find(|request| request.id == id)
                    .ok_or(WithdrawalsServiceError::NotFound)?;

                let resolved_now = request.resolve(decision);
                let snapshot = request.clone();

                if resolved_now && decision == WithdrawalDecision::Reject {
                    let _refunded = state.update_user(snapshot.user_id, |u| {
                        u.balance = u.balance.saturating_add(snapshot.amount);
                    });
                }

                Ok(snapshot)
            })
    }

    async fn list(&self) -> Vec<WithdrawalRequest> {
        self.store.read(|state| state.withdrawals.clone())
    }

    async fn pending(&self) -> Vec<WithdrawalRequest> {
        self.store.read(|state| {
            state
                .withdrawals
                .iter()
                .filter(|request| request.status == WithdrawalStatus::Pending)
                .cloned()
                .collect()
        })
    }
}

#[automock]
#[async_trait]
pub trait WithdrawalsService: Send + Sync {
    /// Reserve part of the signed-in user's balance as a pending
    /// withdrawal, snapshotting the payout key.
    async fn request(&self, amount: u64) -> Result<WithdrawalRequest, WithdrawalsServiceError>;

    /// Resolve a pending request. Rejection refunds the reservation;
    /// approval pays out with no further balance change. Resolving an
    /// already-resolved request is a no-op.
    async fn process(
        &self,
        id: WithdrawalId,
        decision: WithdrawalDecision,
    ) -> Result<WithdrawalRequest, WithdrawalsServiceError>;

    /// Every request, newest first.
    async fn list(&self) -> Vec<WithdrawalRequest>;

    /// Requests still awaiting a decision.
    async fn pending(&self) -> Vec<WithdrawalRequest>;
}
