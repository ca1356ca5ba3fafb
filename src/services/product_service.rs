use crate::{
    dto::products::{
        LimitQuery, ProductList, ProductListQuery, ProductWithCategory, ProductWithCategoryList,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Unfiltered listings carry the category name; the category filter returns
/// plain products, matching what the storefront renders in each view.
pub async fn list_products(
    state: &AppState,
    query: ProductListQuery,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let data = match query.category_id {
        Some(category_id) => {
            let items = state.store.products_by_category(category_id).await;
            serde_json::to_value(ProductList { items })
        }
        None => {
            let items = state
                .store
                .products_with_category()
                .await
                .into_iter()
                .map(ProductWithCategory::from)
                .collect();
            serde_json::to_value(ProductWithCategoryList { items })
        }
    }
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn featured_products(
    state: &AppState,
    query: LimitQuery,
) -> AppResult<ApiResponse<ProductWithCategoryList>> {
    let items = state
        .store
        .featured_products(query.limit)
        .await
        .into_iter()
        .map(ProductWithCategory::from)
        .collect();
    Ok(ApiResponse::success(
        "OK",
        ProductWithCategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn popular_products(
    state: &AppState,
    query: LimitQuery,
) -> AppResult<ApiResponse<ProductWithCategoryList>> {
    let items = state
        .store
        .popular_products(query.limit)
        .await
        .into_iter()
        .map(ProductWithCategory::from)
        .collect();
    Ok(ApiResponse::success(
        "OK",
        ProductWithCategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductWithCategory>> {
    let row = state
        .store
        .product_with_category(id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", row.into(), None))
}
