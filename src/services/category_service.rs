use crate::{
    dto::categories::CategoryList,
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.store.categories().await;
    Ok(ApiResponse::success(
        "OK",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let category = state.store.category(id).await.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", category, None))
}
