use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::{AppError, Result, is_unique_violation},
    models::Product,
};

pub async fn create_product(pool: &PgPool, name: &str, price: Decimal) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(price)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Product already exists".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(product)
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn update_product(
    pool: &PgPool,
    id: i32,
    name: &str,
    price: Decimal,
) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET name = $1, price = $2, updated_at = NOW()
         WHERE id = $3 RETURNING *",
    )
    .bind(name)
    .bind(price)
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Product already exists".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(product)
}

pub async fn set_image_url(pool: &PgPool, id: i32, image_url: &str) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET image_url = $1, updated_at = NOW()
         WHERE id = $2 RETURNING *",
    )
    .bind(image_url)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Referencing purchases are removed by the storage-level cascade.
pub async fn delete_product(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id DESC")
        .fetch_all(pool)
        .await?;

    Ok(products)
}
