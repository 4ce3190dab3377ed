mod admin;
mod health;
mod login;
mod products;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let public_product_routes = Router::new()
        .route("/list", get(products::list_products))
        .route("/:id", get(products::get_product));

    let admin_product_routes = Router::new()
        .route("/add", post(admin::add_product))
        .route("/update/:id", post(admin::update_product))
        .route("/remove/:id", post(admin::remove_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::admin_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/admin/login", post(login::admin_login))
        .nest(
            "/api/product",
            public_product_routes.merge(admin_product_routes),
        )
        .with_state(state)
}
