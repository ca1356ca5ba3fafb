use apex_commerce_api::{
    dto::{
        auth::RegisterRequest,
        cart::{AddToCartRequest, UpdateCartItemRequest},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{NewCategory, NewProduct},
    services::{auth_service, cart_service},
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

/// Seeds one category and `count` products priced 10.0, 20.0, ...
async fn seed_products(state: &AppState, count: i32) -> Vec<i32> {
    let category = state
        .store
        .create_category(NewCategory {
            name: "Gadgets".to_string(),
            description: None,
        })
        .await;

    let mut ids = Vec::new();
    for n in 1..=count {
        let product = state
            .store
            .create_product(NewProduct {
                name: format!("Gadget {n}"),
                description: "A gadget".to_string(),
                price: 10.0 * n as f64,
                old_price: None,
                image_url: None,
                category_id: category.id,
                stock: 100,
                rating: 0.0,
                rating_count: 0,
                is_featured: false,
                is_popular: false,
            })
            .await;
        ids.push(product.id);
    }
    ids
}

// Register alice, add product 3 twice, and the cart holds a single merged line.
#[tokio::test]
async fn repeated_add_merges_into_one_line() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let product_ids = seed_products(&state, 3).await;
    let target = product_ids[2];

    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: target,
            quantity: 2,
        },
    )
    .await?;
    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: target,
            quantity: 1,
        },
    )
    .await?;

    let cart = cart_service::list_cart(&state, &alice)
        .await?
        .data
        .expect("cart data");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].item.product_id, target);
    assert_eq!(cart.items[0].item.quantity, 3);

    Ok(())
}

#[tokio::test]
async fn adding_unknown_product_is_rejected() {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;

    let err = cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: 999,
            quantity: 1,
        },
    )
    .await
    .expect_err("unknown product");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn zero_quantity_fails_validation() {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let product_ids = seed_products(&state, 1).await;

    let err = cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: product_ids[0],
            quantity: 0,
        },
    )
    .await
    .expect_err("zero quantity");
    assert!(matches!(err, AppError::Validation(_)));
}

// Foreign cart rows answer 404, the same as absent ones.
#[tokio::test]
async fn foreign_cart_rows_are_not_found() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let bob = register_user(&state, "bob", "secret2").await;
    let product_ids = seed_products(&state, 1).await;

    let line = cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: product_ids[0],
            quantity: 2,
        },
    )
    .await?
    .data
    .expect("cart item");

    let err = cart_service::update_cart_item(
        &state,
        &bob,
        line.id,
        UpdateCartItemRequest { quantity: 5 },
    )
    .await
    .expect_err("foreign update");
    assert!(matches!(err, AppError::NotFound));

    let err = cart_service::remove_cart_item(&state, &bob, line.id)
        .await
        .expect_err("foreign delete");
    assert!(matches!(err, AppError::NotFound));

    // Alice's line is untouched.
    let cart = cart_service::list_cart(&state, &alice)
        .await?
        .data
        .expect("cart data");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].item.quantity, 2);

    Ok(())
}

#[tokio::test]
async fn update_remove_and_clear_own_lines() -> anyhow::Result<()> {
    let state = setup_state();
    let alice = register_user(&state, "alice", "secret1").await;
    let product_ids = seed_products(&state, 2).await;

    let first = cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: product_ids[0],
            quantity: 1,
        },
    )
    .await?
    .data
    .expect("cart item");
    cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            product_id: product_ids[1],
            quantity: 1,
        },
    )
    .await?;

    let updated = cart_service::update_cart_item(
        &state,
        &alice,
        first.id,
        UpdateCartItemRequest { quantity: 4 },
    )
    .await?
    .data
    .expect("cart item");
    assert_eq!(updated.quantity, 4);

    cart_service::remove_cart_item(&state, &alice, first.id).await?;
    let cart = cart_service::list_cart(&state, &alice)
        .await?
        .data
        .expect("cart data");
    assert_eq!(cart.items.len(), 1);

    cart_service::clear_cart(&state, &alice).await;
    let cart = cart_service::list_cart(&state, &alice)
        .await?
        .data
        .expect("cart data");
    assert!(cart.items.is_empty());

    Ok(())
}
