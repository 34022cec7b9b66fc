use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ApiResponse, LoginRequest, LoginResponse},
    queries::user_queries,
    utils::{jwt, normalize::normalize_email, password},
};

/// Unknown email and wrong password produce the same response, so the
/// endpoint gives no signal about which emails are registered.
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    let email = normalize_email(&payload.email);

    let user = user_queries::find_by_email_with_password(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !password::verify(&payload.password, &user.password).await {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = jwt::generate_token(
        &state.jwt_secret,
        user.id,
        &user.email,
        state.token_ttl_hours,
    )?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            access_token: token,
        },
    )))
}
