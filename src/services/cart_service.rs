use validator::Validate;

use crate::{
    dto::cart::{AddToCartRequest, CartLine, CartList, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, NewCartItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_cart(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let items = state
        .store
        .cart_items_with_products(auth.user.id)
        .await
        .into_iter()
        .map(|(item, product)| CartLine { item, product })
        .collect();
    Ok(ApiResponse::success(
        "OK",
        CartList { items },
        Some(Meta::empty()),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    auth: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    payload.validate()?;

    // The store does not enforce referential integrity; reject dangling
    // product references here.
    if state.store.product(payload.product_id).await.is_none() {
        return Err(AppError::BadRequest("Product not found".to_string()));
    }

    let item = state
        .store
        .create_cart_item(NewCartItem {
            user_id: auth.user.id,
            product_id: payload.product_id,
            quantity: payload.quantity,
        })
        .await;

    Ok(ApiResponse::success("Added to cart", item, None))
}

pub async fn update_cart_item(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    payload.validate()?;
    ensure_owned(state, auth, id).await?;

    let item = state
        .store
        .update_cart_item(id, payload.quantity)
        .await
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success("Cart updated", item, None))
}

pub async fn remove_cart_item(state: &AppState, auth: &AuthUser, id: i32) -> AppResult<()> {
    ensure_owned(state, auth, id).await?;

    if !state.store.delete_cart_item(id).await {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn clear_cart(state: &AppState, auth: &AuthUser) {
    state.store.clear_cart(auth.user.id).await;
}

/// Foreign rows answer Not Found, the same as absent ones, so the existence
/// of another user's cart item is not disclosed.
async fn ensure_owned(state: &AppState, auth: &AuthUser, id: i32) -> AppResult<()> {
    match state.store.cart_item(id).await {
        Some(item) if item.user_id == auth.user.id => Ok(()),
        _ => Err(AppError::NotFound),
    }
}
