//! Axum router construction.
//!
//! Builds the application router with all routes, the CORS policy for the
//! configured front-end origin, and request tracing.

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.config.cors.front_url);

    Router::new()
        .route("/", get(routes::health::root))
        .route(
            "/items",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route(
            "/items/{id}",
            get(routes::items::get_item).delete(routes::items::delete_item),
        )
        .route("/search", get(routes::items::search_items))
        .route("/image/{filename}", get(routes::images::get_image))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// CORS policy: only the configured front-end origin, with the four verbs
/// the catalog exposes.
fn cors_layer(front_url: &str) -> CorsLayer {
    let methods = [Method::GET, Method::PUT, Method::POST, Method::DELETE];

    match front_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!("Invalid CORS origin {front_url:?} ({e}); denying all origins");
            CorsLayer::new().allow_methods(methods).allow_headers(Any)
        }
    }
}
