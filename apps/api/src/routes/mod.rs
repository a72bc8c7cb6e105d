pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tailor::handlers;

/// Room for multipart boundaries, part headers and the job description on top
/// of the file itself, so oversized files reach the handler's own size check.
const MULTIPART_HEADROOM_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_HEADROOM_BYTES;

    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/tailor-resume",
            post(handlers::handle_tailor_resume).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
