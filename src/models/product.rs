use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Prices arrive as either a JSON string or a bare number; both go
/// through the same fixed-point parse so no binary float is involved.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    /// Parses to a non-negative amount with exactly two decimal places.
    /// Returns None for anything that is not a valid price.
    pub fn parse(&self) -> Option<Decimal> {
        let raw = match self {
            PriceInput::Number(n) => n.to_string(),
            PriceInput::Text(s) => s.trim().to_string(),
        };

        let value = Decimal::from_str(&raw).ok()?;
        if value.is_sign_negative() {
            return None;
        }

        let mut value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        Some(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: PriceInput,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
}

#[derive(Debug, Serialize)]
pub struct DeletedProduct {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub file_path: String,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str) -> PriceInput {
        PriceInput::Text(raw.to_string())
    }

    #[test]
    fn whole_number_gets_two_decimals() {
        assert_eq!(text("10").parse().unwrap().to_string(), "10.00");
        assert_eq!(text(" 3.5 ").parse().unwrap().to_string(), "3.50");
    }

    #[test]
    fn excess_precision_is_rounded() {
        assert_eq!(text("3.499").parse().unwrap().to_string(), "3.50");
        assert_eq!(text("0.005").parse().unwrap().to_string(), "0.01");
    }

    #[test]
    fn negative_and_garbage_are_rejected() {
        assert!(text("-1").parse().is_none());
        assert!(text("abc").parse().is_none());
        assert!(text("").parse().is_none());
    }

    #[test]
    fn json_numbers_are_accepted() {
        let input: PriceInput = serde_json::from_value(serde_json::json!(10)).unwrap();
        assert_eq!(input.parse().unwrap().to_string(), "10.00");

        let input: PriceInput = serde_json::from_value(serde_json::json!("12.345")).unwrap();
        assert_eq!(input.parse().unwrap().to_string(), "12.35");
    }
}
