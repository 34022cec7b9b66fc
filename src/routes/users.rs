use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        ApiResponse, CreateUserRequest, DeletedUser, USER_NOT_FOUND, UpdateUserRequest, User,
    },
    queries::user_queries,
    utils::{normalize::normalize_email, password},
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<User>>>> {
    let users = user_queries::list_users(&state.db).await?;

    Ok(Json(ApiResponse::ok("Users listed", users)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>> {
    validate_new_user(&payload)?;

    let email = normalize_email(&payload.email);
    let name = payload.name.trim();

    if user_queries::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let password_hash = password::hash(&payload.password).await?;
    let user = user_queries::create_user(&state.db, &email, name, &password_hash).await?;

    Ok(Json(ApiResponse::ok("User created", user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let user = user_queries::find_by_email(&state.db, &normalize_email(&email)).await?;

    Ok(Json(match user {
        Some(user) => ApiResponse::ok("User found", user),
        None => ApiResponse::fail("User not found", Some(USER_NOT_FOUND)),
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>> {
    let Some(user) = user_queries::find_by_email(&state.db, &normalize_email(&email)).await? else {
        return Ok(Json(ApiResponse::fail(
            "User not found",
            Some(USER_NOT_FOUND),
        )));
    };

    let name = match &payload.name {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::BadRequest("Name cannot be empty".to_string()));
            }
            name.to_string()
        }
        None => user.name.clone(),
    };

    let email = match &payload.email {
        Some(new_email) => {
            if new_email.is_empty() || !new_email.contains('@') {
                return Err(AppError::BadRequest("Invalid email address".to_string()));
            }

            let new_email = normalize_email(new_email);
            if new_email != user.email
                && user_queries::find_by_email(&state.db, &new_email)
                    .await?
                    .is_some()
            {
                return Err(AppError::Conflict("Email already in use".to_string()));
            }
            new_email
        }
        None => user.email.clone(),
    };

    // An empty password means "leave it alone", matching the other
    // optional fields.
    let password_hash = match &payload.password {
        Some(new_password) if !new_password.trim().is_empty() => {
            if new_password.len() < 6 {
                return Err(AppError::BadRequest(
                    "Password must be at least 6 characters".to_string(),
                ));
            }
            Some(password::hash(new_password).await?)
        }
        _ => None,
    };

    let updated =
        user_queries::update_user(&state.db, user.id, &name, &email, password_hash.as_deref())
            .await?;

    Ok(Json(ApiResponse::ok("User updated", updated)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<DeletedUser>>> {
    let Some(user) = user_queries::find_by_email(&state.db, &normalize_email(&email)).await? else {
        return Ok(Json(ApiResponse::fail(
            "User not found",
            Some(USER_NOT_FOUND),
        )));
    };

    user_queries::delete_user(&state.db, user.id).await?;

    Ok(Json(ApiResponse::ok(
        "User deleted",
        DeletedUser {
            id: user.id,
            email: user.email,
            name: user.name,
        },
    )))
}

fn validate_new_user(payload: &CreateUserRequest) -> Result<()> {
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
