use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints the gate classifies as `Public`. Anonymous and logged-in visitors alike get
/// through; a stale credential is purged on the way.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        .route("/", get(handlers::home_page))
        .route("/about", get(handlers::about_page))
        // POST /logout
        // Clears both session cookies. Public so an expired session can still log out.
        .route("/logout", post(handlers::logout))
}
