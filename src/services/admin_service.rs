use validator::Validate;

use crate::{
    dto::{
        categories::CategoryRequest,
        orders::{OrderList, OrderWithItems, UpdateOrderStatusRequest},
        products::ProductRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Order, OrderStatus, Product},
    response::{ApiResponse, Meta},
    state::AppState,
};

// ---- categories ----

pub async fn create_category(
    state: &AppState,
    auth: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(auth)?;
    payload.validate()?;

    let category = state.store.create_category(payload.into()).await;
    tracing::info!(category_id = category.id, "category created");
    Ok(ApiResponse::success("Category created", category, None))
}

pub async fn update_category(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(auth)?;
    payload.validate()?;

    let category = state
        .store
        .update_category(id, payload.into())
        .await
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Category updated", category, None))
}

pub async fn delete_category(state: &AppState, auth: &AuthUser, id: i32) -> AppResult<()> {
    ensure_admin(auth)?;

    if !state.store.delete_category(id).await {
        return Err(AppError::NotFound);
    }
    tracing::info!(category_id = id, "category deleted");
    Ok(())
}

// ---- products ----

pub async fn create_product(
    state: &AppState,
    auth: &AuthUser,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(auth)?;
    payload.validate()?;
    ensure_category_exists(state, payload.category_id).await?;

    let product = state.store.create_product(payload.into()).await;
    tracing::info!(product_id = product.id, "product created");
    Ok(ApiResponse::success("Product created", product, None))
}

pub async fn update_product(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(auth)?;
    payload.validate()?;
    ensure_category_exists(state, payload.category_id).await?;

    let product = state
        .store
        .update_product(id, payload.into())
        .await
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product updated", product, None))
}

pub async fn delete_product(state: &AppState, auth: &AuthUser, id: i32) -> AppResult<()> {
    ensure_admin(auth)?;

    if !state.store.delete_product(id).await {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = id, "product deleted");
    Ok(())
}

// ---- orders ----

pub async fn list_all_orders(
    state: &AppState,
    auth: &AuthUser,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(auth)?;

    let items = state.store.orders().await;
    Ok(ApiResponse::success(
        "OK",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_order_admin(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(auth)?;

    let (order, rows) = state
        .store
        .order_with_items(id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "OK",
        OrderWithItems::from_rows(order, rows),
        Some(Meta::empty()),
    ))
}

/// Any status in the enum is accepted; there is no transition graph.
pub async fn update_order_status(
    state: &AppState,
    auth: &AuthUser,
    id: i32,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(auth)?;

    let status = OrderStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest("Invalid order status".to_string()))?;

    let order = state
        .store
        .update_order_status(id, status)
        .await
        .ok_or(AppError::NotFound)?;

    tracing::info!(order_id = order.id, status = %payload.status, "order status updated");
    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

async fn ensure_category_exists(state: &AppState, category_id: i32) -> AppResult<()> {
    if state.store.category(category_id).await.is_none() {
        return Err(AppError::BadRequest("Category not found".to_string()));
    }
    Ok(())
}
