use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::products::{LimitQuery, ProductListQuery, ProductWithCategory, ProductWithCategoryList},
    error::AppResult,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/featured", get(featured_products))
        .route("/popular", get(popular_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("categoryId" = Option<i32>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List products; unfiltered listings include category names", body = ApiResponse<serde_json::Value>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/featured",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum number of products")
    ),
    responses(
        (status = 200, description = "Featured products", body = ApiResponse<ProductWithCategoryList>),
    ),
    tag = "Products"
)]
pub async fn featured_products(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<ApiResponse<ProductWithCategoryList>>> {
    let resp = product_service::featured_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/popular",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum number of products")
    ),
    responses(
        (status = 200, description = "Popular products", body = ApiResponse<ProductWithCategoryList>),
    ),
    tag = "Products"
)]
pub async fn popular_products(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<ApiResponse<ProductWithCategoryList>>> {
    let resp = product_service::popular_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product with category", body = ApiResponse<ProductWithCategory>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductWithCategory>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}
