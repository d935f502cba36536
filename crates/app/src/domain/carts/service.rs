//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use reelcart::{
    carts::{self, CartItem, SellerGroup},
    products::{Product, ProductId},
    users::UserId,
};

use crate::{domain::carts::errors::CartsServiceError, storage::Slot, store::Store};

#[derive(Debug, Clone)]
pub struct StoreCartsService {
    store: Store,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn add_to_cart(&self, product: Product) -> CartItem {
        self.store
            .mutate(&[Slot::Cart], |state| carts::add_product(&mut state.cart, product))
    }

    async fn remove_from_cart(&self, product_id: ProductId) {
        self.store.mutate(&[Slot::Cart], |state| {
            carts::remove_product(&mut state.cart, product_id);
        });
    }

    async fn clear_cart(&self, seller_id: Option<UserId>) {
        self.store.mutate(&[Slot::Cart], |state| match seller_id {
            Some(seller) => carts::remove_seller(&mut state.cart, seller),
            None => state.cart.clear(),
        });
    }

    async fn cart(&self) -> Vec<CartItem> {
        self.store.read(|state| state.cart.clone())
    }

    async fn grouped_by_seller(&self) -> Result<Vec<SellerGroup>, CartsServiceError> {
        self.store
            .read(|state| carts::group_by_seller(&state.cart).map_err(Into::into))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Merge a product snapshot into the cart; re-adding an id increments
    /// its quantity instead of duplicating the row.
    async fn add_to_cart(&self, product: Product) -> CartItem;

    /// Drop the row with the given product id.
    async fn remove_from_cart(&self, product_id: ProductId);

    /// Clear one seller's rows, or the whole cart when no seller is given.
    async fn clear_cart(&self, seller_id: Option<UserId>);

    /// The current cart rows.
    async fn cart(&self) -> Vec<CartItem>;

    /// The cart grouped per seller, with subtotals, for checkout.
    async fn grouped_by_seller(&self) -> Result<Vec<SellerGroup>, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, sample_product};

    use super::*;

    #[tokio::test]
    async fn adding_same_product_twice_merges_quantity() {
        let ctx = TestContext::new();
        let product = sample_product(12_999, UserId::new());

        ctx.carts.add_to_cart(product.clone()).await;
        let row = ctx.carts.add_to_cart(product).await;

        assert_eq!(row.quantity, 2);
        assert_eq!(ctx.carts.cart().await.len(), 1);
    }

    #[tokio::test]
    async fn remove_from_cart_drops_the_row() {
        let ctx = TestContext::new();
        let product = sample_product(500, UserId::new());

        ctx.carts.add_to_cart(product.clone()).await;
        ctx.carts.remove_from_cart(product.id).await;

        assert!(ctx.carts.cart().await.is_empty());
    }

    #[tokio::test]
    async fn clear_cart_with_seller_only_touches_that_seller() {
        let ctx = TestContext::new();
        let seller_a = UserId::new();
        let seller_b = UserId::new();

        ctx.carts.add_to_cart(sample_product(100, seller_a)).await;
        ctx.carts.add_to_cart(sample_product(200, seller_b)).await;

        ctx.carts.clear_cart(Some(seller_a)).await;

        let cart = ctx.carts.cart().await;
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.first().map(|row| row.product.seller_id),
            Some(seller_b)
        );
    }

    #[tokio::test]
    async fn clear_cart_without_seller_empties_everything() {
        let ctx = TestContext::new();

        ctx.carts
            .add_to_cart(sample_product(100, UserId::new()))
            .await;
        ctx.carts
            .add_to_cart(sample_product(200, UserId::new()))
            .await;

        ctx.carts.clear_cart(None).await;

        assert!(ctx.carts.cart().await.is_empty());
    }

    #[tokio::test]
    async fn grouped_by_seller_subtotals_each_group() -> TestResult {
        let ctx = TestContext::new();
        let seller = UserId::new();
        let product = sample_product(1_000, seller);

        ctx.carts.add_to_cart(product.clone()).await;
        ctx.carts.add_to_cart(product).await;
        ctx.carts
            .add_to_cart(sample_product(250, UserId::new()))
            .await;

        let groups = ctx.carts.grouped_by_seller().await?;

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.first().map(|g| g.subtotal), Some(2_000));

        Ok(())
    }
}
