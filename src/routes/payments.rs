use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::payments::{PaymentResult, SimulatePaymentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/simulate-payment", post(simulate_payment))
}

#[utoipa::path(
    post,
    path = "/api/simulate-payment",
    request_body = SimulatePaymentRequest,
    responses(
        (status = 200, description = "Demo payment accepted after a fixed delay", body = ApiResponse<PaymentResult>),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Payments"
)]
pub async fn simulate_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SimulatePaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentResult>>> {
    let resp = payment_service::simulate_payment(&state, &auth, payload).await?;
    Ok(Json(resp))
}
