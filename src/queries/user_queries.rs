use sqlx::PgPool;

use crate::{
    error::{AppError, Result, is_unique_violation},
    models::{User, UserCredentials},
};

pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, name, password) VALUES ($1, $2, $3)
         RETURNING id, email, name, created_at, updated_at",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already in use".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, name, created_at, updated_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Includes the stored credential. Used by login only.
pub async fn find_by_email_with_password(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserCredentials>> {
    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, email, password FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_user(
    pool: &PgPool,
    id: i32,
    name: &str,
    email: &str,
    password_hash: Option<&str>,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = $1, email = $2, password = COALESCE($3, password), updated_at = NOW()
         WHERE id = $4
         RETURNING id, email, name, created_at, updated_at",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already in use".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(user)
}

/// Owned purchases are removed by the storage-level cascade.
pub async fn delete_user(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, email, name, created_at, updated_at FROM users ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}
