use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Order, OrderItem, Product, ShippingDetails};

/// Checkout payload: shipping destination only. The item list and total are
/// derived server-side from the caller's cart at current product prices.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 1))]
    pub shipping_address: String,
    #[validate(length(min = 1))]
    pub shipping_city: String,
    #[validate(length(min = 1))]
    pub shipping_state: String,
    #[validate(length(min = 1))]
    pub shipping_zip_code: String,
    #[validate(length(min = 1))]
    pub shipping_country: String,
}

impl From<CheckoutRequest> for ShippingDetails {
    fn from(payload: CheckoutRequest) -> Self {
        Self {
            address: payload.shipping_address,
            city: payload.shipping_city,
            state: payload.shipping_state,
            zip_code: payload.shipping_zip_code,
            country: payload.shipping_country,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemLine {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemLine>,
}

impl OrderWithItems {
    pub fn from_rows(order: Order, rows: Vec<(OrderItem, Product)>) -> Self {
        Self {
            order,
            items: rows
                .into_iter()
                .map(|(item, product)| OrderItemLine { item, product })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
