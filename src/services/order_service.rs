use validator::Validate;

use crate::{
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_orders(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let items = state.store.orders_by_user(auth.user.id).await;
    Ok(ApiResponse::success(
        "OK",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

/// Owners see their own orders; admins may fetch any. Everything else is
/// Not Found so foreign order ids are not probeable.
pub async fn get_order(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let (order, rows) = state
        .store
        .order_with_items(id)
        .await
        .ok_or(AppError::NotFound)?;

    if order.user_id != auth.user.id && !auth.user.is_admin {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems::from_rows(order, rows),
        Some(Meta::empty()),
    ))
}

/// Validate, then let the store perform snapshot -> persist -> clear as one
/// operation: a failure before persistence leaves the cart untouched, and a
/// concurrent add cannot slip between the order and the clear.
pub async fn checkout(
    state: &AppState,
    auth: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    payload.validate()?;

    let (order, rows) = state
        .store
        .checkout_cart(auth.user.id, payload.into())
        .await
        .ok_or_else(|| AppError::BadRequest("Cart is empty".to_string()))?;

    tracing::info!(
        order_id = order.id,
        user_id = auth.user.id,
        total = order.total,
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems::from_rows(order, rows),
        Some(Meta::empty()),
    ))
}
