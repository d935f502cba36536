//! Purchased ad-credit ledger.
//!
//! Append-only rows recording credit purchases; the read side feeds the
//! admin financial report. Only `approved` rows count toward totals.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{ids::TypedUuid, users::UserId};

/// Credit transaction UUID
pub type CreditTxId = TypedUuid<CreditTransaction>;

/// Settlement state of a credit purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    /// Transfer confirmed; credits granted.
    Approved,
    /// Awaiting transfer confirmation.
    Pending,
    /// Purchase abandoned or refused.
    Cancelled,
}

/// One credit purchase ledger row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditTransaction {
    /// Unique row identifier.
    pub id: CreditTxId,

    /// Purchasing user.
    pub user_id: UserId,

    /// Purchasing user's display name at purchase time.
    pub user_name: String,

    /// Amount paid, in minor units.
    pub amount: u64,

    /// Credits granted by this purchase.
    pub credits: u32,

    /// Settlement state.
    pub status: CreditStatus,

    /// Transfer identifier supplied by the buyer.
    pub pix_id: String,

    /// Purchase timestamp.
    pub created_at: Timestamp,
}

/// Totals over the approved slice of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditSummary {
    /// Credits granted across approved purchases.
    pub total_credits: u64,

    /// Minor units collected across approved purchases.
    pub total_amount: u64,
}

/// Fold the ledger into its approved-only totals.
#[must_use]
pub fn summarize<'a, I>(rows: I) -> CreditSummary
where
    I: IntoIterator<Item = &'a CreditTransaction>,
{
    rows.into_iter()
        .filter(|row| row.status == CreditStatus::Approved)
        .fold(CreditSummary::default(), |acc, row| CreditSummary {
            total_credits: acc.total_credits.saturating_add(u64::from(row.credits)),
            total_amount: acc.total_amount.saturating_add(row.amount),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: CreditStatus, amount: u64, credits: u32) -> CreditTransaction {
        CreditTransaction {
            id: CreditTxId::new(),
            user_id: UserId::new(),
            user_name: "Ana".to_string(),
            amount,
            credits,
            status,
            pix_id: "pix-1".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn summarize_counts_approved_rows_only() {
        let ledger = [
            row(CreditStatus::Approved, 2_500, 5),
            row(CreditStatus::Pending, 1_000, 2),
            row(CreditStatus::Approved, 5_000, 10),
            row(CreditStatus::Cancelled, 9_900, 20),
        ];

        let summary = summarize(&ledger);

        assert_eq!(summary.total_credits, 15);
        assert_eq!(summary.total_amount, 7_500);
    }

    #[test]
    fn summarize_empty_ledger_is_zero() {
        let ledger: Vec<CreditTransaction> = Vec::new();

        assert_eq!(summarize(&ledger), CreditSummary::default());
    }
}
