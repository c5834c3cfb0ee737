use axum::{
    middleware::from_fn,
    routing::{delete, get},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Wardrobe items
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/items/:id", delete(handlers::delete_item))
        // Saved outfits
        .route(
            "/outfits",
            get(handlers::list_outfits).post(handlers::create_outfit),
        )
        // Recommendations
        .route("/recommendations", get(handlers::recommendations))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
