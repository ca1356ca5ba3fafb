use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use validator::Validate;

use crate::{
    dto::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{NewUser, UserPatch},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Salted argon2id hash; the salt travels inside the single PHC string.
pub fn hash_password(plain: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

/// Constant-time verification against a stored PHC string. A malformed
/// stored value verifies false instead of erroring.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Creates the account and opens a session. Returns the session token for
/// the route layer to turn into a cookie.
pub async fn register(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<(String, ApiResponse<UserResponse>)> {
    payload.validate()?;

    if state
        .store
        .user_by_username(&payload.username)
        .await
        .is_some()
    {
        return Err(AppError::BadRequest("Username already exists".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .store
        .create_user(NewUser {
            username: payload.username,
            password_hash,
            email: payload.email,
            is_admin: false,
            first_name: payload.first_name,
            last_name: payload.last_name,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            country: payload.country,
            phone: payload.phone,
        })
        .await;

    let token = state.sessions.open(user.id).await;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        token,
        ApiResponse::success("User created", user.into(), None),
    ))
}

/// Authenticates strictly by hash comparison against the stored record;
/// there is no other accepted credential shape.
pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<(String, ApiResponse<UserResponse>)> {
    let user = state
        .store
        .user_by_username(&payload.username)
        .await
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.open(user.id).await;
    tracing::info!(user_id = user.id, username = %user.username, "user logged in");

    Ok((
        token,
        ApiResponse::success("Logged in", user.into(), Some(Meta::empty())),
    ))
}

pub async fn current_user(auth: AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::success("OK", auth.user.into(), Some(Meta::empty()))
}

pub async fn update_profile(
    state: &AppState,
    auth: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<UserResponse>> {
    payload.validate()?;

    let patch = UserPatch {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        address: payload.address,
        city: payload.city,
        state: payload.state,
        zip_code: payload.zip_code,
        country: payload.country,
        phone: payload.phone,
    };
    let user = state
        .store
        .update_user(auth.user.id, patch)
        .await
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Profile updated",
        user.into(),
        Some(Meta::empty()),
    ))
}
