use std::time::Duration;

use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::payments::{PaymentResult, SimulatePaymentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

const PAYMENT_DELAY: Duration = Duration::from_secs(1);

/// Demo gateway: no charge is made. Blocks only the issuing request for a
/// fixed delay, then reports success.
pub async fn simulate_payment(
    _state: &AppState,
    auth: &AuthUser,
    payload: SimulatePaymentRequest,
) -> AppResult<ApiResponse<PaymentResult>> {
    payload.validate()?;

    tokio::time::sleep(PAYMENT_DELAY).await;

    let result = PaymentResult {
        success: true,
        payment_id: format!("demo_payment_{}", Uuid::new_v4().simple()),
        payment_method: payload.payment_method,
        message: "Payment processed successfully".to_string(),
    };

    tracing::info!(
        order_id = payload.order_id,
        user_id = auth.user.id,
        "simulated payment accepted"
    );

    Ok(ApiResponse::success(
        "Payment processed",
        result,
        Some(Meta::empty()),
    ))
}
