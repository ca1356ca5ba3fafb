use apex_commerce_api::{
    dto::{
        auth::RegisterRequest,
        cart::AddToCartRequest,
        categories::CategoryRequest,
        orders::{CheckoutRequest, UpdateOrderStatusRequest},
        payments::SimulatePaymentRequest,
        products::ProductRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{NewCategory, NewProduct, NewUser, OrderStatus},
    services::{admin_service, auth_service, cart_service, order_service, payment_service},
    session::SessionStore,
    state::AppState,
    store::Store,
};

fn setup_state() -> AppState {
    AppState {
        store: Store::new(),
        sessions: SessionStore::new(30),
    }
}

async fn register_user(state: &AppState, username: &str, password: &str) -> AuthUser {
    auth_service::register(
        state,
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: format!("{username}@example.com"),
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            phone: None,
        },
    )
    .await
    .expect("registration");
    let user = state
        .store
        .user_by_username(username)
        .await
        .expect("stored user");
    AuthUser { user }
}

async fn create_admin(state: &AppState) -> AuthUser {
    let password_hash = auth_service::hash_password("admin-secret").expect("hash");
    let user = state
        .store
        .create_user(NewUser {
            username: "admin".to_string(),
            password_hash,
            email: "admin@example.com".to_string(),
            is_admin: true,
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            phone: None,
        })
        .await;
    AuthUser { user }
}

async fn seed_product(state: &AppState, category_id: i32, name: &str, price: f64) -> i32 {
    state
        .store
        .create_product(NewProduct {
            name: name.to_string(),
            description: "A product".to_string(),
            price,
            old_price: None,
            image_url: None,
            category_id,
            stock: 100,
            rating: 0.0,
            rating_count: 0,
            is_featured: false,
            is_popular: false,
        })
        .await
        .id
}

fn shipping() -> CheckoutRequest {
    CheckoutRequest {
        shipping_address: "1 Main St".to_string(),
        shipping_city: "Springfield".to_string(),
        shipping_state: "IL".to_string(),
        shipping_zip_code: "62701".to_string(),
        shipping_country: "USA".to_string(),
    }
}

fn product_request(category_id: i32, name: &str, price: f64) -> ProductRequest {
    ProductRequest {
        name: name.to_string(),
        description: "A product".to_string(),
        price,
        old_price: None,
        image_url: None,
        category_id,
        stock: 100,
        rating: None,
        rating_count: None,
        is_featured: None,
        is_popular: None,
    }
}

// Checkout snapshots prices, clears the cart, and survives later catalog edits.
#[tokio::test]
async fn checkout_captures_prices_and_clears_cart() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let admin = create_admin(&state).await;

    let category = state
        .store
        .create_category(NewCategory {
            name: "Gadgets".to_string(),
            description: None,
        })
        .await;
    let cheap = seed_product(&state, category.id, "Cheap Gadget", 10.0).await;
    let pricey = seed_product(&state, category.id, "Pricey Gadget", 25.5).await;

    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: cheap,
            quantity: 2,
        },
    )
    .await?;
    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: pricey,
            quantity: 1,
        },
    )
    .await?;

    let placed = order_service::checkout(&state, &alice, shipping())
        .await?
        .data
        .expect("order data");
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.total, 45.5);
    assert_eq!(placed.items.len(), 2);
    assert_eq!(placed.items[0].item.price, 10.0);
    assert_eq!(placed.items[0].item.quantity, 2);
    assert_eq!(placed.items[1].item.price, 25.5);

    // The cart is empty afterwards.
    let cart = cart_service::list_cart(&state, &alice)
        .await?
        .data
        .expect("cart data");
    assert!(cart.items.is_empty());

    // A later price change does not rewrite the purchased snapshot.
    admin_service::update_product(
        &state,
        &admin,
        cheap,
        product_request(category.id, "Cheap Gadget", 99.0),
    )
    .await?;
    let fetched = order_service::get_order(&state, &alice, placed.order.id)
        .await?
        .data
        .expect("order data");
    assert_eq!(fetched.items[0].item.price, 10.0);
    assert_eq!(fetched.order.total, 45.5);

    Ok(())
}

#[tokio::test]
async fn empty_cart_checkout_creates_nothing() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;

    let err = order_service::checkout(&state, &alice, shipping())
        .await
        .expect_err("empty cart");
    assert!(matches!(err, AppError::BadRequest(_)));

    let orders = order_service::list_orders(&state, &alice)
        .await?
        .data
        .expect("orders data");
    assert!(orders.items.is_empty());

    Ok(())
}

// Foreign orders answer 404 for users; admins may fetch any order.
#[tokio::test]
async fn order_access_is_owner_or_admin() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let bob = register_user(&state, "bob", "secret2").await;
    let admin = create_admin(&state).await;

    let category = state
        .store
        .create_category(NewCategory {
            name: "Gadgets".to_string(),
            description: None,
        })
        .await;
    let product = seed_product(&state, category.id, "Gadget", 10.0).await;
    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: product,
            quantity: 1,
        },
    )
    .await?;
    let placed = order_service::checkout(&state, &alice, shipping())
        .await?
        .data
        .expect("order data");

    let err = order_service::get_order(&state, &bob, placed.order.id)
        .await
        .expect_err("foreign order");
    assert!(matches!(err, AppError::NotFound));

    let fetched = order_service::get_order(&state, &admin, placed.order.id).await?;
    assert_eq!(fetched.data.expect("order data").order.id, placed.order.id);

    // Bob's own listing does not include Alice's order.
    let orders = order_service::list_orders(&state, &bob)
        .await?
        .data
        .expect("orders data");
    assert!(orders.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn admin_endpoints_reject_non_admins() {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;

    let err = admin_service::create_category(
        &state,
        &alice,
        CategoryRequest {
            name: "Gadgets".to_string(),
            description: None,
        },
    )
    .await
    .expect_err("non-admin create");
    assert!(matches!(err, AppError::Forbidden));

    let err = admin_service::list_all_orders(&state, &alice)
        .await
        .expect_err("non-admin list");
    assert!(matches!(err, AppError::Forbidden));

    let err = admin_service::update_order_status(
        &state,
        &alice,
        1,
        UpdateOrderStatusRequest {
            status: "SHIPPED".to_string(),
        },
    )
    .await
    .expect_err("non-admin status update");
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn admin_updates_order_status() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let admin = create_admin(&state).await;

    let category = state
        .store
        .create_category(NewCategory {
            name: "Gadgets".to_string(),
            description: None,
        })
        .await;
    let product = seed_product(&state, category.id, "Gadget", 10.0).await;
    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: product,
            quantity: 1,
        },
    )
    .await?;
    let placed = order_service::checkout(&state, &alice, shipping())
        .await?
        .data
        .expect("order data");

    let err = admin_service::update_order_status(
        &state,
        &admin,
        placed.order.id,
        UpdateOrderStatusRequest {
            status: "teleported".to_string(),
        },
    )
    .await
    .expect_err("bad status");
    assert!(matches!(err, AppError::BadRequest(_)));

    let updated = admin_service::update_order_status(
        &state,
        &admin,
        placed.order.id,
        UpdateOrderStatusRequest {
            status: "SHIPPED".to_string(),
        },
    )
    .await?
    .data
    .expect("order data");
    assert_eq!(updated.status, OrderStatus::Shipped);

    // The admin listing sees every order.
    let all = admin_service::list_all_orders(&state, &admin)
        .await?
        .data
        .expect("orders data");
    assert_eq!(all.items.len(), 1);

    Ok(())
}

#[tokio::test]
async fn admin_manages_catalog() -> anyhow::Result<()> {
    let state = setup_state();
    let admin = create_admin(&state).await;

    let category = admin_service::create_category(
        &state,
        &admin,
        CategoryRequest {
            name: "Gadgets".to_string(),
            description: Some("Devices".to_string()),
        },
    )
    .await?
    .data
    .expect("category data");

    // Products must reference an existing category.
    let err = admin_service::create_product(
        &state,
        &admin,
        product_request(category.id + 100, "Phantom", 1.0),
    )
    .await
    .expect_err("dangling category");
    assert!(matches!(err, AppError::BadRequest(_)));

    let product = admin_service::create_product(
        &state,
        &admin,
        product_request(category.id, "Gadget", 10.0),
    )
    .await?
    .data
    .expect("product data");

    let updated = admin_service::update_product(
        &state,
        &admin,
        product.id,
        product_request(category.id, "Gadget v2", 12.0),
    )
    .await?
    .data
    .expect("product data");
    assert_eq!(updated.name, "Gadget v2");
    assert_eq!(updated.price, 12.0);

    admin_service::delete_product(&state, &admin, product.id).await?;
    let err = admin_service::delete_product(&state, &admin, product.id)
        .await
        .expect_err("already deleted");
    assert!(matches!(err, AppError::NotFound));

    admin_service::delete_category(&state, &admin, category.id).await?;

    Ok(())
}

// start_paused lets the fixed gateway delay elapse instantly.
#[tokio::test(start_paused = true)]
async fn simulated_payment_always_succeeds() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;

    let result = payment_service::simulate_payment(
        &state,
        &alice,
        SimulatePaymentRequest {
            order_id: 1,
            payment_method: "card".to_string(),
        },
    )
    .await?
    .data
    .expect("payment data");

    assert!(result.success);
    assert!(result.payment_id.starts_with("demo_payment_"));
    assert_eq!(result.payment_method, "card");

    Ok(())
}
