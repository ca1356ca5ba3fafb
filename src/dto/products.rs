use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewProduct, Product, ProductUpdate};

/// Body for both create and full-replace update. Rating and flag fields are
/// optional; on create they default (0 rating, not featured/popular), on
/// update an omitted field keeps its current value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    pub old_price: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    pub rating_count: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_popular: Option<bool>,
}

impl From<ProductRequest> for NewProduct {
    fn from(payload: ProductRequest) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            old_price: payload.old_price,
            image_url: payload.image_url,
            category_id: payload.category_id,
            stock: payload.stock,
            rating: payload.rating.unwrap_or(0.0),
            rating_count: payload.rating_count.unwrap_or(0),
            is_featured: payload.is_featured.unwrap_or(false),
            is_popular: payload.is_popular.unwrap_or(false),
        }
    }
}

impl From<ProductRequest> for ProductUpdate {
    fn from(payload: ProductRequest) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            old_price: payload.old_price,
            image_url: payload.image_url,
            category_id: payload.category_id,
            stock: payload.stock,
            rating: payload.rating,
            rating_count: payload.rating_count,
            is_featured: payload.is_featured,
            is_popular: payload.is_popular,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
}

impl From<(Product, String)> for ProductWithCategory {
    fn from((product, category_name): (Product, String)) -> Self {
        Self {
            product,
            category_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductWithCategoryList {
    #[schema(value_type = Vec<ProductWithCategory>)]
    pub items: Vec<ProductWithCategory>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}
