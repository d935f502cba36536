//! The cart: product snapshots keyed by product id.
//!
//! Adding a product that is already in the cart increments its quantity
//! rather than duplicating the row. Checkout works per seller, so the cart
//! can also be viewed grouped by seller with per-group subtotals.

use serde::{Deserialize, Serialize};

use crate::{
    money::{self, MoneyError},
    products::{Product, ProductId},
    users::UserId,
};

/// A cart row: one product snapshot plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product snapshot taken at add-to-cart time.
    pub product: Product,

    /// Number of units; at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// This row's price contribution.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] when price times quantity overflows.
    pub fn line_total(&self) -> Result<u64, MoneyError> {
        money::line_total(self.product.price, self.quantity)
    }
}

/// One seller's slice of the cart.
#[derive(Debug, Clone)]
pub struct SellerGroup {
    /// The seller all rows in this group belong to.
    pub seller_id: UserId,

    /// The rows, in cart order.
    pub items: Vec<CartItem>,

    /// Sum of the rows' line totals.
    pub subtotal: u64,
}

/// Merge a product into the cart: bump quantity when the id is already
/// present, otherwise append a new row with quantity 1. Returns the row
/// as it now stands.
pub fn add_product(cart: &mut Vec<CartItem>, product: Product) -> CartItem {
    if let Some(row) = cart.iter_mut().find(|row| row.product.id == product.id) {
        row.quantity = row.quantity.saturating_add(1);
        return row.clone();
    }

    let row = CartItem {
        product,
        quantity: 1,
    };
    cart.push(row.clone());

    row
}

/// Drop the row with the given product id, if present.
pub fn remove_product(cart: &mut Vec<CartItem>, product_id: ProductId) {
    cart.retain(|row| row.product.id != product_id);
}

/// Drop every row belonging to the given seller.
pub fn remove_seller(cart: &mut Vec<CartItem>, seller_id: UserId) {
    cart.retain(|row| row.product.seller_id != seller_id);
}

/// Group the cart by seller, preserving first-appearance order, with a
/// subtotal per group.
///
/// # Errors
///
/// Returns [`MoneyError::Overflow`] when any group's subtotal overflows.
pub fn group_by_seller(cart: &[CartItem]) -> Result<Vec<SellerGroup>, MoneyError> {
    let mut groups: Vec<SellerGroup> = Vec::new();

    for row in cart {
        let seller_id = row.product.seller_id;

        if let Some(group) = groups.iter_mut().find(|g| g.seller_id == seller_id) {
            group.items.push(row.clone());
        } else {
            groups.push(SellerGroup {
                seller_id,
                items: vec![row.clone()],
                subtotal: 0,
            });
        }
    }

    for group in &mut groups {
        group.subtotal = money::sum_minor(
            group
                .items
                .iter()
                .map(CartItem::line_total)
                .collect::<Result<Vec<_>, _>>()?,
        )?;
    }

    Ok(groups)
}
