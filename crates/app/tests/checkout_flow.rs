//! End-to-end flow: a creator publishes a video, an admin approves it, a
//! buyer checks the product out, and the seller confirms payment.

use std::sync::Arc;

use testresult::TestResult;

use reelcart::{
    orders::{OrderStatus, ShippingAddress},
    users::{NewAccount, Role},
    videos::{NewProductCard, NewVideo, VideoStatus},
};
use reelcart_app::{
    ai::StaticEnrichment,
    context::AppContext,
    domain::{
        accounts::AccountsService,
        carts::CartsService,
        orders::OrdersService,
        platform::PlatformService,
        videos::{PublishPolicy, VideosService},
    },
    storage::{MemoryStorage, Storage},
};

fn context() -> (AppContext, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = AppContext::from_storage(
        Arc::clone(&storage) as Arc<dyn Storage>,
        PublishPolicy::default(),
        Arc::new(StaticEnrichment),
    );

    (ctx, storage)
}

fn upload() -> NewVideo {
    NewVideo {
        url: "https://cdn.example/v/launch.mp4".to_string(),
        thumbnail: "https://cdn.example/t/launch.jpg".to_string(),
        description: "These new sneakers are absolute fire! 🔥".to_string(),
        category: "Sports".to_string(),
        tags: vec!["running".to_string()],
        product: Some(NewProductCard {
            name: "Speedster X 5000".to_string(),
            brand: Some("Speedster".to_string()),
            price: 12_999,
            description: "Ultra-light shoes for professionals.".to_string(),
            image: "https://cdn.example/p/shoe.jpg".to_string(),
            product_url: None,
        }),
    }
}

fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Bob Buyer".to_string(),
        email: "bob@example.com".to_string(),
        street: "Rua das Flores".to_string(),
        number: "120".to_string(),
        complement: Some("apt 42".to_string()),
        neighborhood: "Centro".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        zip_code: "01000-000".to_string(),
    }
}

#[tokio::test]
async fn creator_to_paid_order_round_trip() -> TestResult {
    let (ctx, storage) = context();

    // The creator registers and uploads a video with a product attached.
    let creator = ctx
        .accounts
        .register(NewAccount {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            name: "Ana".to_string(),
            role: Role::Creator,
        })
        .await?;

    let revenue_before = ctx.platform.config().await.total_revenue;
    let ad_price = ctx.platform.config().await.ad_price;

    let video = ctx.videos.publish(upload()).await?;
    assert_eq!(video.status, VideoStatus::PendingPayment);
    assert_eq!(
        ctx.platform.config().await.total_revenue,
        revenue_before + ad_price
    );

    // Not in the feed until an admin approves it.
    assert!(ctx.videos.feed().await.is_empty());
    ctx.videos.approve(video.id).await?;

    let feed = ctx.videos.feed().await;
    assert_eq!(feed.len(), 1);

    // The buyer signs in and adds the product twice; the cart merges the
    // rows into one with quantity 2.
    ctx.accounts.logout().await;
    ctx.accounts
        .register(NewAccount {
            email: "bob@example.com".to_string(),
            password: "hunter2".to_string(),
            name: "Bob Buyer".to_string(),
            role: Role::User,
        })
        .await?;

    let product = feed
        .first()
        .and_then(|v| v.product.clone())
        .expect("approved video should carry its product");

    ctx.carts.add_to_cart(product.clone()).await;
    let row = ctx.carts.add_to_cart(product.clone()).await;
    assert_eq!(row.quantity, 2);
    assert_eq!(ctx.carts.cart().await.len(), 1);

    // Checkout for this seller: one order, cart emptied for that seller.
    let order = ctx
        .orders
        .checkout_seller(creator.id, "pix-proof-001".to_string(), address())
        .await?;

    assert_eq!(order.status, OrderStatus::PendingVerification);
    assert_eq!(order.total, 25_998);
    assert_eq!(order.seller_id, creator.id);
    assert!(ctx.carts.cart().await.is_empty());

    // The seller confirms the transfer.
    let paid = ctx.orders.update_status(order.id, OrderStatus::Paid).await?;
    assert_eq!(paid.status, OrderStatus::Paid);

    let seller_orders = ctx.orders.orders_for_seller(creator.id).await;
    assert_eq!(seller_orders.len(), 1);

    // Everything above survives a restart over the same storage.
    let reopened = AppContext::from_storage(
        storage as Arc<dyn Storage>,
        PublishPolicy::default(),
        Arc::new(StaticEnrichment),
    );

    assert_eq!(reopened.videos.feed().await.len(), 1);
    assert_eq!(reopened.orders.list_orders().await.len(), 1);
    assert_eq!(
        reopened
            .orders
            .list_orders()
            .await
            .first()
            .map(|o| o.status),
        Some(OrderStatus::Paid)
    );

    Ok(())
}

#[tokio::test]
async fn guest_checkout_without_a_session() -> TestResult {
    let (ctx, _storage) = context();

    ctx.accounts
        .register(NewAccount {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            name: "Ana".to_string(),
            role: Role::Creator,
        })
        .await?;

    let video = ctx.videos.publish(upload()).await?;
    ctx.videos.approve(video.id).await?;
    ctx.accounts.logout().await;

    let product = ctx
        .videos
        .get(video.id)
        .await?
        .product
        .expect("video should carry its product");
    let seller = product.seller_id;

    ctx.carts.add_to_cart(product).await;

    let order = ctx
        .orders
        .checkout_seller(seller, String::new(), address())
        .await?;

    assert!(order.is_guest());
    assert_eq!(order.buyer_name, "Bob Buyer");

    Ok(())
}
