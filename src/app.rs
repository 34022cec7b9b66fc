use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    config::AppConfig,
    database,
    error::{AppError, Result},
    middleware::{self, RateLimiter},
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub upload_dir: PathBuf,
    pub limiter: Arc<RateLimiter>,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;

    tokio::fs::create_dir_all(&config.upload.dir)
        .await
        .map_err(|e| AppError::ConfigError(format!("Cannot create upload directory: {}", e)))?;

    let refill_rate =
        config.rate_limit.max_requests as f64 / config.rate_limit.window_secs.max(1) as f64;

    let state = AppState {
        db: pool,
        jwt_secret: config.auth.jwt_secret.clone(),
        token_ttl_hours: config.auth.token_ttl_hours,
        upload_dir: config.upload.dir.clone(),
        limiter: Arc::new(RateLimiter::new(
            config.rate_limit.max_requests as f64,
            refill_rate,
        )),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_origin(allowed_origins);

    let app = routes::create_router(state.clone())
        .nest_service("/uploads", ServeDir::new(&config.upload.dir))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .layer(from_fn_with_state(state.clone(), middleware::throttle))
        .layer(from_fn(middleware::log_requests))
        .with_state(state);

    Ok(app)
}
