use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Purchase, PurchaseRecord},
};

const PURCHASE_JOIN: &str = "SELECT p.id, p.quantity, p.total_price, p.purchase_date,
            u.id AS user_id, u.email AS user_email, u.name AS user_name,
            pr.id AS product_id, pr.name AS product_name,
            pr.price AS product_price, pr.image_url AS product_image_url
     FROM purchases p
     JOIN users u ON u.id = p.user_id
     JOIN products pr ON pr.id = p.product_id";

/// Single-row insert; nothing else is mutated, so no transaction spans it.
pub async fn create_purchase(
    pool: &PgPool,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    total_price: Decimal,
) -> Result<Purchase> {
    let purchase = sqlx::query_as::<_, Purchase>(
        "INSERT INTO purchases (user_id, product_id, quantity, total_price)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(total_price)
    .fetch_one(pool)
    .await?;

    Ok(purchase)
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<PurchaseRecord>> {
    let records =
        sqlx::query_as::<_, PurchaseRecord>(&format!("{} ORDER BY p.id DESC", PURCHASE_JOIN))
            .fetch_all(pool)
            .await?;

    Ok(records)
}

pub async fn list_by_user_email(pool: &PgPool, email: &str) -> Result<Vec<PurchaseRecord>> {
    let records = sqlx::query_as::<_, PurchaseRecord>(&format!(
        "{} WHERE u.email = $1 ORDER BY p.id DESC",
        PURCHASE_JOIN
    ))
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(records)
}
