mod rate_limit;

pub use rate_limit::RateLimiter;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::{AppState, error::AppError, utils::jwt};

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;

    let claims = jwt::verify_token(&state.jwt_secret, token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let ip = client_ip(&req)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    tracing::info!("{} {} {} -> {}", ip, method, uri, response.status());

    response
}

pub async fn throttle(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&req).unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !state.limiter.try_acquire(ip) {
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(req).await)
}

fn client_ip(req: &Request) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
}
