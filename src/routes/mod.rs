mod health;
mod login;
mod products;
mod profile;
mod purchases;
mod register;
mod upload;
mod users;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::{AppState, middleware};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/register", post(register::register_user))
        .route("/auth/login", post(login::login_user))
        .route(
            "/auth/profile",
            get(profile::get_profile)
                .route_layer(from_fn_with_state(state, middleware::require_auth)),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:email",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:name",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/upload/:name", post(upload::upload_product_image))
        .route(
            "/purchases",
            get(purchases::list_purchases).post(purchases::create_purchase),
        )
        .route("/purchases/:email", get(purchases::get_user_purchases))
}
