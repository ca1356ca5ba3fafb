use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use crate::{
    dto::cart::{AddToCartRequest, CartList, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::CartItem,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart).delete(clear_cart))
        .route("/{id}", put(update_cart_item).delete(remove_cart_item))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines with products for the current user", body = ApiResponse<CartList>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_cart(&state, &auth).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Line added, or quantity merged into the existing line", body = ApiResponse<CartItem>),
        (status = 400, description = "Validation failure or unknown product"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<impl IntoResponse> {
    let resp = cart_service::add_to_cart(&state, &auth, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/cart/{id}",
    params(
        ("id" = i32, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::update_cart_item(&state, &auth, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    params(
        ("id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 404, description = "Cart item not found"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    cart_service::remove_cart_item(&state, &auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 204, description = "Cart cleared"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(State(state): State<AppState>, auth: AuthUser) -> StatusCode {
    cart_service::clear_cart(&state, &auth).await;
    StatusCode::NO_CONTENT
}
