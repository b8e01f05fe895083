use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/state", get(handlers::get_state))
        .route("/api/feed", get(handlers::list_feed))
        .route("/api/feed/reload", post(handlers::reload_feed))
        .route("/api/view", put(handlers::set_view))
        .route("/api/view/manual", post(handlers::open_manual))
        .route("/api/resources/:id/process", post(handlers::process_resource))
        .route("/api/analyzer/analyze", post(handlers::analyze_article))
        .route("/api/podcast/review", post(handlers::review_podcast))
        .route("/api/vocab", get(handlers::list_vocab).post(handlers::save_vocab))
        .route("/api/vocab/from-analysis/:index", post(handlers::save_from_analysis))
        .route("/api/vocab/sync", post(handlers::sync_vocab))
        .route("/api/vocab/export", get(handlers::export_vocab))
        .layer(cors)
        .with_state(state)
}

pub mod prelude {
    pub use crate::{create_app, ApiError, AppState};
    pub use recall_core::{Error, Result};
}
