//! Durable slot storage.
//!
//! The application state persists as a fixed set of named slots. All
//! implementations must satisfy these invariants:
//! - Each slot is written in full on every store; there are no partial or
//!   incremental writes.
//! - A missing slot is not an error — `load` returns `Ok(None)` and the
//!   caller substitutes a typed default.
//! - The store never interprets slot contents; it is a pure byte-oriented
//!   key-value store.
//! - I/O errors are propagated to the caller, which decides whether they
//!   are fatal (they are not: persistence is fire-and-forget).

mod json;
mod memory;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage i/o error")]
    Io(#[from] std::io::Error),
}

/// The named slots the application state persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The user collection.
    Users,
    /// The current session user, if any.
    Session,
    /// The cart rows.
    Cart,
    /// The video collection.
    Videos,
    /// The order collection.
    Orders,
    /// The withdrawal request collection.
    Withdrawals,
    /// The credit purchase ledger.
    CreditTransactions,
    /// The platform fee percentage.
    PlatformFee,
    /// The ad submission price.
    AdPrice,
    /// The admin payout key.
    AdminPixKey,
    /// The recognized revenue accumulator.
    TotalRevenue,
}

impl Slot {
    /// Every slot, in load order.
    pub const ALL: [Self; 11] = [
        Self::Users,
        Self::Session,
        Self::Cart,
        Self::Videos,
        Self::Orders,
        Self::Withdrawals,
        Self::CreditTransactions,
        Self::PlatformFee,
        Self::AdPrice,
        Self::AdminPixKey,
        Self::TotalRevenue,
    ];

    /// The stable storage key for this slot.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Session => "session",
            Self::Cart => "cart",
            Self::Videos => "videos",
            Self::Orders => "orders",
            Self::Withdrawals => "withdrawals",
            Self::CreditTransactions => "credit_transactions",
            Self::PlatformFee => "platform_fee",
            Self::AdPrice => "ad_price",
            Self::AdminPixKey => "admin_pix_key",
            Self::TotalRevenue => "total_revenue",
        }
    }
}

/// A byte-oriented named-slot store.
pub trait Storage: Send + Sync {
    /// Read a slot's bytes.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    fn load(&self, slot: Slot) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrite a slot in full.
    fn store(&self, slot: Slot, bytes: &[u8]) -> StorageResult<()>;
}
