use axum::{Extension, Json};

use crate::utils::jwt::Claims;

/// Claims were verified and injected by the auth middleware.
pub async fn get_profile(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
