use crate::handlers::{gold, ratio, silver};
use crate::state::AppState;
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/gold-price", get(gold::gold_price))
        .route("/gold-silver-ratio", get(ratio::gold_silver_ratio))
        .route("/shanghai-silver-price", get(silver::shanghai_silver_price));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
