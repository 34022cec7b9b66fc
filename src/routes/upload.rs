use axum::{
    Json,
    extract::{Multipart, Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ApiResponse, PRODUCT_NOT_FOUND, UploadedImage},
    queries::product_queries,
};

/// Stores the first file part under the upload directory and records
/// its public path on the product.
pub async fn upload_product_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedImage>>> {
    let Some(product) = product_queries::find_by_name(&state.db, name.trim()).await? else {
        return Ok(Json(ApiResponse::fail(
            "Product not found",
            Some(PRODUCT_NOT_FOUND),
        )));
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let file_name = build_file_name(&product.name, &original_name);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        tokio::fs::write(state.upload_dir.join(&file_name), &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {}", e)))?;

        let file_path = format!("/uploads/{}", file_name);
        let product = product_queries::set_image_url(&state.db, product.id, &file_path).await?;

        return Ok(Json(ApiResponse::ok(
            "File uploaded",
            UploadedImage { file_path, product },
        )));
    }

    Ok(Json(ApiResponse::fail("No file uploaded", None)))
}

/// Derives the stored file name from the product name and the upload's
/// extension. Only filesystem-safe characters survive.
fn build_file_name(product_name: &str, original: &str) -> String {
    let mut stem: String = product_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();

    if stem.is_empty() {
        stem.push_str("image");
    }

    match std::path::Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_becomes_underscores() {
        assert_eq!(build_file_name("Red  Apple", "photo.png"), "Red_Apple.png");
    }

    #[test]
    fn missing_extension_is_tolerated() {
        assert_eq!(build_file_name("Apple", "photo"), "Apple");
    }

    #[test]
    fn traversal_characters_are_stripped() {
        assert_eq!(build_file_name("../etc", "x.png"), "etc.png");
        assert_eq!(build_file_name("///", "x.png"), "image.png");
    }
}
