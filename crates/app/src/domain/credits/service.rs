//! Credits service: the append-only purchase ledger and its admin
//! reporting aggregates.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use reelcart::{
    credits::{self, CreditStatus, CreditSummary, CreditTransaction, CreditTxId},
    users::UserId,
};

use crate::{domain::credits::errors::CreditsServiceError, storage::Slot, store::Store};

/// Payload for recording a credit purchase.
#[derive(Debug, Clone)]
pub struct NewCreditPurchase {
    /// Purchasing user.
    pub user_id: UserId,

    /// Amount paid, in minor units.
    pub amount: u64,

    /// Credits granted by this purchase.
    pub credits: u32,

    /// Settlement state at record time.
    pub status: CreditStatus,

    /// Transfer identifier supplied by the buyer.
    pub pix_id: String,
}

#[derive(Debug, Clone)]
pub struct StoreCreditsService {
    store: Store,
}

impl StoreCreditsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CreditsService for StoreCreditsService {
    async fn record_purchase(
        &self,
        purchase: NewCreditPurchase,
    ) -> Result<CreditTransaction, CreditsServiceError> {
        self.store
            .try_mutate(&[Slot::CreditTransactions], |state| {
                let user = state
                    .find_user(purchase.user_id)
                    .ok_or(CreditsServiceError::UnknownUser)?;

                let row = CreditTransaction {
                    id: CreditTxId::new(),
                    user_id: user.id,
                    user_name: user.name.clone(),
                    amount: purchase.amount,
                    credits: purchase.credits,
                    status: purchase.status,
                    pix_id: purchase.pix_id,
                    created_at: Timestamp::now(),
                };

                state.credit_transactions.insert(0, row.clone());

                Ok(row)
            })
    }

    async fn list(&self) -> Vec<CreditTransaction> {
        self.store.read(|state| state.credit_transactions.clone())
    }

    async fn summary(&self) -> CreditSummary {
        self.store
            .read(|state| credits::summarize(&state.credit_transactions))
    }
}

#[automock]
#[async_trait]
pub trait CreditsService: Send + Sync {
    /// Append a purchase to the ledger, snapshotting the buyer's name.
    async fn record_purchase(
        &self,
        purchase: NewCreditPurchase,
    ) -> Result<CreditTransaction, CreditsServiceError>;

    /// The full ledger, newest first.
    async fn list(&self) -> Vec<CreditTransaction>;

    /// Approved-only totals for the admin financial report.
    async fn summary(&self) -> CreditSummary;
}
