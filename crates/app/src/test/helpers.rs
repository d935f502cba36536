//! Test Helpers

use reelcart::{
    orders::ShippingAddress,
    products::{Product, ProductId},
    users::{NewAccount, Role, User, UserId},
    videos::{NewProductCard, NewVideo},
};

use crate::{domain::accounts::AccountsServiceError, test::TestContext};

use crate::domain::accounts::AccountsService as _;

pub(crate) fn new_account(email: &str, name: &str, role: Role) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: "secret".to_string(),
        name: name.to_string(),
        role,
    }
}

/// Register a creator account and leave it signed in.
pub(crate) async fn register_creator(
    ctx: &TestContext,
    email: &str,
    name: &str,
) -> Result<User, AccountsServiceError> {
    ctx.accounts
        .register(new_account(email, name, Role::Creator))
        .await
}

pub(crate) fn sample_product(price: u64, seller_id: UserId) -> Product {
    Product {
        id: ProductId::new(),
        name: "Speedster X 5000".to_string(),
        brand: Some("Speedster".to_string()),
        price,
        description: "Ultra-light shoes for professionals.".to_string(),
        image: "https://picsum.photos/seed/shoe/200".to_string(),
        affiliate_commission: 15,
        product_url: None,
        rating: 48,
        reviews: 342,
        seller_id,
    }
}

pub(crate) fn new_video(price: u64) -> NewVideo {
    NewVideo {
        url: "https://cdn.example/v/1.mp4".to_string(),
        thumbnail: "https://cdn.example/t/1.jpg".to_string(),
        description: "These new sneakers are absolute fire! 🔥".to_string(),
        category: "Sports".to_string(),
        tags: vec!["running".to_string(), "fitness".to_string()],
        product: Some(NewProductCard {
            name: "Speedster X 5000".to_string(),
            brand: Some("Speedster".to_string()),
            price,
            description: "Ultra-light shoes for professionals.".to_string(),
            image: "https://picsum.photos/seed/shoe/200".to_string(),
            product_url: None,
        }),
    }
}

pub(crate) fn sample_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        street: "Rua das Flores".to_string(),
        number: "120".to_string(),
        complement: None,
        neighborhood: "Centro".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        zip_code: "01000-000".to_string(),
    }
}
