use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Category, NewCategory};

/// Body for both create and full-replace update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryRequest> for NewCategory {
    fn from(payload: CategoryRequest) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}
