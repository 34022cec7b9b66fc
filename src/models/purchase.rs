use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Product, User};

/// Raw purchases row. The total is a snapshot taken at creation time;
/// later product price changes never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Purchase {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total_price: Decimal,
    pub purchase_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub user_email: String,
    pub product_name: String,
    pub quantity: i32,
}

/// One joined row from purchases × users × products.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PurchaseRecord {
    pub id: i32,
    pub quantity: i32,
    pub total_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub user_id: i32,
    pub user_email: String,
    pub user_name: String,
    pub product_id: i32,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PurchaseProduct {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub id: i32,
    pub quantity: i32,
    pub total_price: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub user: PurchaseUser,
    pub product: PurchaseProduct,
}

impl PurchaseResponse {
    pub fn from_parts(purchase: Purchase, user: &User, product: &Product) -> Self {
        Self {
            id: purchase.id,
            quantity: purchase.quantity,
            total_price: purchase.total_price,
            purchase_date: purchase.purchase_date,
            user: PurchaseUser {
                id: user.id,
                email: user.email.clone(),
                name: user.name.clone(),
            },
            product: PurchaseProduct {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
            },
        }
    }
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            id: record.id,
            quantity: record.quantity,
            total_price: record.total_price,
            purchase_date: record.purchase_date,
            user: PurchaseUser {
                id: record.user_id,
                email: record.user_email,
                name: record.user_name,
            },
            product: PurchaseProduct {
                id: record.product_id,
                name: record.product_name,
                price: record.product_price,
                image_url: record.product_image_url,
            },
        }
    }
}
