use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ApiResponse, RegisterRequest, RegisterResponse, USER_CREATE_FAILED},
    queries::user_queries,
    utils::{normalize::normalize_email, password},
};

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>> {
    validate_registration(&payload)?;

    let email = normalize_email(&payload.email);
    let name = payload.name.trim();

    if user_queries::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash(&payload.password).await?;

    // A duplicate slipping past the pre-check still surfaces as a
    // conflict; any other create failure becomes a reported result.
    let user = match user_queries::create_user(&state.db, &email, name, &password_hash).await {
        Ok(user) => user,
        Err(e @ AppError::Conflict(_)) => return Err(e),
        Err(e) => {
            tracing::error!("User creation failed: {}", e);
            return Ok(Json(ApiResponse::fail(
                "User could not be created",
                Some(USER_CREATE_FAILED),
            )));
        }
    };

    Ok(Json(ApiResponse::ok(
        "User created",
        RegisterResponse::from(user),
    )))
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    if payload.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(validate_registration(&request("a@b.com", "Ada", "secret1")).is_ok());
    }

    #[test]
    fn rejects_bad_email_name_and_password() {
        assert!(validate_registration(&request("not-an-email", "Ada", "secret1")).is_err());
        assert!(validate_registration(&request("", "Ada", "secret1")).is_err());
        assert!(validate_registration(&request("a@b.com", "   ", "secret1")).is_err());
        assert!(validate_registration(&request("a@b.com", "Ada", "short")).is_err());
    }
}
