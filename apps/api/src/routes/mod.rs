pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::share::handlers as share;
use crate::souvenir::handlers as souvenir;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Guest view: `?poem=<token>` replaces the form for that load.
        .route("/", get(share::handle_root))
        // Generation
        .route("/api/v1/poems", post(generation::handle_generate))
        // Derived actions — idempotent, never re-enter generation
        .route("/api/v1/poems/souvenir", post(souvenir::handle_souvenir))
        .route("/api/v1/poems/share", post(share::handle_share))
        .route("/api/v1/poems/share/qr", get(share::handle_share_qr))
        .with_state(state)
}
