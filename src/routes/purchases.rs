use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        ApiResponse, CreatePurchaseRequest, PRODUCT_NOT_FOUND, PurchaseResponse, USER_NOT_FOUND,
    },
    queries::{product_queries, purchase_queries, user_queries},
    utils::normalize::normalize_email,
};

/// The purchase workflow: validate quantity, resolve both entities,
/// snapshot the total, insert one row. Missing user/product are
/// reported results, not faults — no row is written for them.
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(payload): Json<CreatePurchaseRequest>,
) -> Result<Json<ApiResponse<PurchaseResponse>>> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let email = normalize_email(&payload.user_email);
    let Some(user) = user_queries::find_by_email(&state.db, &email).await? else {
        return Ok(Json(ApiResponse::fail(
            "User not found",
            Some(USER_NOT_FOUND),
        )));
    };

    let Some(product) =
        product_queries::find_by_name(&state.db, payload.product_name.trim()).await?
    else {
        return Ok(Json(ApiResponse::fail(
            "Product not found",
            Some(PRODUCT_NOT_FOUND),
        )));
    };

    let total = compute_total(product.price, payload.quantity).ok_or_else(|| {
        AppError::BadRequest("Total price could not be computed".to_string())
    })?;

    let purchase =
        purchase_queries::create_purchase(&state.db, user.id, product.id, payload.quantity, total)
            .await?;

    Ok(Json(ApiResponse::ok(
        "Purchase created",
        PurchaseResponse::from_parts(purchase, &user, &product),
    )))
}

pub async fn list_purchases(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PurchaseResponse>>>> {
    let purchases: Vec<PurchaseResponse> = purchase_queries::list_all(&state.db)
        .await?
        .into_iter()
        .map(PurchaseResponse::from)
        .collect();

    Ok(Json(ApiResponse::ok("Purchases listed", purchases)))
}

/// An unknown user simply has no purchases; the result is an empty
/// list either way.
pub async fn get_user_purchases(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<Vec<PurchaseResponse>>>> {
    let purchases: Vec<PurchaseResponse> =
        purchase_queries::list_by_user_email(&state.db, &normalize_email(&email))
            .await?
            .into_iter()
            .map(PurchaseResponse::from)
            .collect();

    Ok(Json(ApiResponse::ok("User purchases listed", purchases)))
}

/// None signals corrupted price data or an overflowing total; both are
/// rejected before anything is persisted.
fn compute_total(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    if unit_price.is_sign_negative() {
        return None;
    }

    let total = unit_price.checked_mul(Decimal::from(quantity))?;

    let mut total = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    total.rescale(2);
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn total_is_unit_price_times_quantity() {
        assert_eq!(compute_total(dec("3.50"), 3).unwrap().to_string(), "10.50");
        assert_eq!(compute_total(dec("10.00"), 1).unwrap().to_string(), "10.00");
    }

    #[test]
    fn whole_prices_keep_two_decimals() {
        assert_eq!(compute_total(dec("5"), 2).unwrap().to_string(), "10.00");
    }

    #[test]
    fn corrupted_negative_price_is_rejected() {
        assert!(compute_total(dec("-1.00"), 1).is_none());
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert!(compute_total(Decimal::MAX, 2).is_none());
    }
}
