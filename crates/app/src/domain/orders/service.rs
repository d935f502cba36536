//! Orders service: the checkout flow and order status handling.
//!
//! Checkout works per seller: the cart is grouped by seller and each
//! group becomes one order, so a buyer can pay one seller while leaving
//! the rest of the cart in place.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use reelcart::{
    carts::{self, CartItem},
    money::{percent_of_minor, sum_minor},
    orders::{Buyer, Order, OrderId, OrderStatus, ShippingAddress},
    users::UserId,
};

use crate::{
    domain::orders::errors::OrdersServiceError,
    storage::Slot,
    store::{AppState, Store},
};

/// Gross/fee/net breakdown of a seller's confirmed sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellerRevenue {
    /// Sum of paid and shipped order totals.
    pub gross: u64,

    /// Platform commission on the gross, at the configured rate.
    pub fee: u64,

    /// Gross minus fee.
    pub net: u64,
}

#[derive(Debug, Clone)]
pub struct StoreOrdersService {
    store: Store,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn create_order(
        &self,
        seller_id: UserId,
        items: Vec<CartItem>,
        transaction_proof: String,
        shipping_address: ShippingAddress,
    ) -> Result<Order, OrdersServiceError> {
        self.store.try_mutate(&[Slot::Orders], |state| {
            let order = Order::create(
                buyer_from_session(state),
                seller_id,
                items,
                transaction_proof,
                shipping_address,
                Timestamp::now(),
            )?;

            state.orders.insert(0, order.clone());

            Ok(order)
        })
    }

    async fn checkout_seller(
        &self,
        seller_id: UserId,
        transaction_proof: String,
        shipping_address: ShippingAddress,
    ) -> Result<Order, OrdersServiceError> {
        self.store.try_mutate(&[Slot::Orders, Slot::Cart], |state| {
            let groups = carts::group_by_seller(&state.cart)?;
            let group = groups
                .into_iter()
                .find(|group| group.seller_id == seller_id)
                .ok_or(OrdersServiceError::NothingToCheckout)?;

            let order = Order::create(
                buyer_from_session(state),
                seller_id,
                group.items,
                transaction_proof,
                shipping_address,
                Timestamp::now(),
            )?;

            state.orders.insert(0, order.clone());
            carts::remove_seller(&mut state.cart, seller_id);

            Ok(order)
        })
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        self.store.try_mutate(&[Slot::Orders], |state| {
            let order = state
                .orders
                .iter_mut()
                .find(|order| order.id == id)
                .ok_or(OrdersServiceError::NotFound)?;

            order.set_status(status)?;

            Ok(order.clone())
        })
    }

    async fn list_orders(&self) -> Vec<Order> {
        self.store.read(|state| state.orders.clone())
    }

    async fn orders_for_seller(&self, seller_id: UserId) -> Vec<Order> {
        self.store.read(|state| {
            state
                .orders
                .iter()
                .filter(|order| order.seller_id == seller_id)
                .cloned()
                .collect()
        })
    }

    async fn orders_for_buyer(&self, buyer_id: UserId) -> Vec<Order> {
        self.store.read(|state| {
            state
                .orders
                .iter()
                .filter(|order| order.buyer_id == buyer_id)
                .cloned()
                .collect()
        })
    }

    async fn seller_revenue(&self, seller_id: UserId) -> Result<SellerRevenue, OrdersServiceError> {
        self.store.read(|state| {
            let gross = sum_minor(
                state
                    .orders
                    .iter()
                    .filter(|order| {
                        order.seller_id == seller_id
                            && matches!(order.status, OrderStatus::Paid | OrderStatus::Shipped)
                    })
                    .map(|order| order.total),
            )?;

            let fee = percent_of_minor(state.config.platform_fee_percent, gross)?;

            Ok(SellerRevenue {
                gross,
                fee,
                net: gross.saturating_sub(fee),
            })
        })
    }
}

fn buyer_from_session(state: &AppState) -> Buyer {
    match &state.session {
        Some(user) => Buyer::Account {
            id: user.id,
            name: user.name.clone(),
        },
        None => Buyer::Guest,
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Append an order in `pending_verification`, freezing its total from
    /// the supplied snapshots. Buyer identity comes from the session when
    /// present, otherwise from the shipping address.
    async fn create_order(
        &self,
        seller_id: UserId,
        items: Vec<CartItem>,
        transaction_proof: String,
        shipping_address: ShippingAddress,
    ) -> Result<Order, OrdersServiceError>;

    /// Create one order from this seller's cart rows, then clear exactly
    /// those rows.
    async fn checkout_seller(
        &self,
        seller_id: UserId,
        transaction_proof: String,
        shipping_address: ShippingAddress,
    ) -> Result<Order, OrdersServiceError>;

    /// Move an order along the status table. Same-status writes are
    /// no-ops; anything outside the table is a typed error.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_orders(&self) -> Vec<Order>;

    /// A seller's incoming orders.
    async fn orders_for_seller(&self, seller_id: UserId) -> Vec<Order>;

    /// A buyer's order history.
    async fn orders_for_buyer(&self, buyer_id: UserId) -> Vec<Order>;

    /// Gross/fee/net over the seller's paid and shipped orders, at the
    /// configured platform fee.
    async fn seller_revenue(&self, seller_id: UserId) -> Result<SellerRevenue, OrdersServiceError>;
}
