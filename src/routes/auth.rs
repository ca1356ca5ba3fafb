use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::auth_service,
    session,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(current_user).put(update_profile))
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and session opened", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failure or username taken"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let (token, resp) = auth_service::register(&state, payload).await?;
    let cookie = session::session_cookie(&token, state.sessions.ttl_seconds());
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(resp),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = ApiResponse<UserResponse>),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (token, resp) = auth_service::login(&state, payload).await?;
    let cookie = session::session_cookie(&token, state.sessions.ttl_seconds());
    Ok(([(header::SET_COOKIE, cookie)], Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session closed", body = ApiResponse<serde_json::Value>),
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session::cookie_token(&headers) {
        state.sessions.close(&token).await;
    }
    (
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Json(ApiResponse::success(
            "Logged out",
            serde_json::json!({}),
            Some(Meta::empty()),
        )),
    )
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn current_user(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(auth_service::current_user(auth).await)
}

#[utoipa::path(
    put,
    path = "/api/user",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let resp = auth_service::update_profile(&state, &auth, payload).await?;
    Ok(Json(resp))
}
