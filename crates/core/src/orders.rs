//! Orders: per-seller checkout commitments and their status machine.
//!
//! An order freezes its item snapshots and total at creation; later edits
//! to the canonical product never change what the buyer committed to pay.
//! Transitions are authoritative: `pending_verification → {paid,
//! cancelled}` and `paid → shipped`; `shipped` and `cancelled` are
//! terminal. Writing the status an order already holds is a no-op.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    carts::CartItem,
    ids::TypedUuid,
    money::{self, MoneyError},
    users::UserId,
};

/// Order UUID
pub type OrderId = TypedUuid<Order>;

/// Payment/fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Buyer submitted transfer proof; seller has not confirmed yet.
    PendingVerification,
    /// Seller confirmed the transfer.
    Paid,
    /// Seller dispatched the items. Terminal.
    Shipped,
    /// Order abandoned or refused. Terminal.
    Cancelled,
}

/// An order status change that the state machine does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("order cannot move from {from:?} to {to:?}")]
pub struct InvalidOrderTransition {
    /// Status the order currently holds.
    pub from: OrderStatus,
    /// Status that was requested.
    pub to: OrderStatus,
}

/// Errors building an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The shipping address is missing a required field.
    #[error("shipping address field `{0}` is required")]
    IncompleteAddress(&'static str),

    /// An order needs at least one item.
    #[error("an order needs at least one item")]
    NoItems,

    /// Total computation overflowed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Delivery destination collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient's full name.
    pub full_name: String,

    /// Contact email.
    pub email: String,

    /// Street name.
    pub street: String,

    /// Street number.
    pub number: String,

    /// Optional unit/apartment line.
    pub complement: Option<String>,

    /// Neighborhood.
    pub neighborhood: String,

    /// City.
    pub city: String,

    /// State or region code.
    pub state: String,

    /// Postal code.
    pub zip_code: String,
}

impl ShippingAddress {
    /// Check that every required field is non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::IncompleteAddress`] naming the first missing
    /// field.
    pub fn validate(&self) -> Result<(), OrderError> {
        let required = [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("street", &self.street),
            ("number", &self.number),
            ("neighborhood", &self.neighborhood),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(OrderError::IncompleteAddress(field));
            }
        }

        Ok(())
    }
}

/// Identity of the buyer placing an order.
#[derive(Debug, Clone)]
pub enum Buyer {
    /// A signed-in user.
    Account {
        /// The buyer's user id.
        id: UserId,
        /// The buyer's display name.
        name: String,
    },
    /// Guest checkout; the display name comes from the shipping address.
    Guest,
}

/// A committed per-seller purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,

    /// Buyer's user id, or the guest sentinel.
    pub buyer_id: UserId,

    /// Buyer display name at order time.
    pub buyer_name: String,

    /// Seller receiving the transfer.
    pub seller_id: UserId,

    /// Item snapshots; immutable after creation.
    pub items: Vec<CartItem>,

    /// Frozen total: Σ price × quantity at creation time.
    pub total: u64,

    /// Verification status.
    pub status: OrderStatus,

    /// Free-text transfer proof supplied by the buyer.
    pub transaction_proof: String,

    /// Delivery destination.
    pub shipping_address: ShippingAddress,

    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// Fixed buyer id used for guest checkouts.
fn guest_buyer_id() -> UserId {
    UserId::from_uuid(uuid::Uuid::nil())
}

impl Order {
    /// Build an order from a seller's cart rows, freezing the total.
    ///
    /// The buyer identity comes from the session when present, otherwise
    /// from the shipping address (guest checkout).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoItems`] for an empty item list,
    /// [`OrderError::IncompleteAddress`] for a blank required address field
    /// and [`OrderError::Money`] when the total overflows.
    pub fn create(
        buyer: Buyer,
        seller_id: UserId,
        items: Vec<CartItem>,
        transaction_proof: String,
        shipping_address: ShippingAddress,
        now: Timestamp,
    ) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        shipping_address.validate()?;

        let total = money::sum_minor(
            items
                .iter()
                .map(CartItem::line_total)
                .collect::<Result<Vec<_>, _>>()?,
        )?;

        let (buyer_id, buyer_name) = match buyer {
            Buyer::Account { id, name } => (id, name),
            Buyer::Guest => (guest_buyer_id(), shipping_address.full_name.clone()),
        };

        Ok(Self {
            id: OrderId::new(),
            buyer_id,
            buyer_name,
            seller_id,
            items,
            total,
            status: OrderStatus::PendingVerification,
            transaction_proof,
            shipping_address,
            created_at: now,
        })
    }

    /// Move the order to a new status.
    ///
    /// Returns `false` when the order already holds the requested status.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOrderTransition`] for any move outside the
    /// transition table.
    pub fn set_status(&mut self, to: OrderStatus) -> Result<bool, InvalidOrderTransition> {
        if self.status == to {
            return Ok(false);
        }

        let allowed = matches!(
            (self.status, to),
            (
                OrderStatus::PendingVerification,
                OrderStatus::Paid | OrderStatus::Cancelled
            ) | (OrderStatus::Paid, OrderStatus::Shipped)
        );

        if !allowed {
            return Err(InvalidOrderTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;

        Ok(true)
    }

    /// Whether this order was placed by a guest.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.buyer_id == guest_buyer_id()
    }
}
