use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        ApiResponse, CreateProductRequest, DeletedProduct, PRODUCT_NOT_FOUND, PriceInput, Product,
        UpdateProductRequest,
    },
    queries::product_queries,
};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = product_queries::list_products(&state.db).await?;

    Ok(Json(ApiResponse::ok("Products listed", products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ApiResponse<Product>>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(
            "Product name cannot be empty".to_string(),
        ));
    }

    let price = parse_price(&payload.price)?;

    if product_queries::find_by_name(&state.db, name).await?.is_some() {
        return Err(AppError::Conflict("Product already exists".to_string()));
    }

    let product = product_queries::create_product(&state.db, name, price).await?;

    Ok(Json(ApiResponse::ok("Product created", product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = product_queries::find_by_name(&state.db, name.trim()).await?;

    Ok(Json(match product {
        Some(product) => ApiResponse::ok("Product found", product),
        None => ApiResponse::fail("Product not found", Some(PRODUCT_NOT_FOUND)),
    }))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<Product>>> {
    let Some(product) = product_queries::find_by_name(&state.db, name.trim()).await? else {
        return Ok(Json(ApiResponse::fail(
            "Product not found",
            Some(PRODUCT_NOT_FOUND),
        )));
    };

    let name = match &payload.name {
        Some(new_name) => {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(AppError::BadRequest(
                    "Product name cannot be empty".to_string(),
                ));
            }

            if new_name != product.name
                && product_queries::find_by_name(&state.db, new_name)
                    .await?
                    .is_some()
            {
                return Err(AppError::Conflict("Product already exists".to_string()));
            }
            new_name.to_string()
        }
        None => product.name.clone(),
    };

    let price = match &payload.price {
        Some(price) => parse_price(price)?,
        None => product.price,
    };

    let updated = product_queries::update_product(&state.db, product.id, &name, price).await?;

    Ok(Json(ApiResponse::ok("Product updated", updated)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<DeletedProduct>>> {
    let Some(product) = product_queries::find_by_name(&state.db, name.trim()).await? else {
        return Ok(Json(ApiResponse::fail(
            "Product not found",
            Some(PRODUCT_NOT_FOUND),
        )));
    };

    product_queries::delete_product(&state.db, product.id).await?;

    Ok(Json(ApiResponse::ok(
        "Product deleted",
        DeletedProduct {
            id: product.id,
            name: product.name,
        },
    )))
}

fn parse_price(input: &PriceInput) -> Result<Decimal> {
    input
        .parse()
        .ok_or_else(|| AppError::BadRequest("Price must be zero or greater".to_string()))
}
