use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulatePaymentRequest {
    #[validate(range(min = 1))]
    pub order_id: i32,
    #[validate(length(min = 1))]
    pub payment_method: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub success: bool,
    pub payment_id: String,
    pub payment_method: String,
    pub message: String,
}
