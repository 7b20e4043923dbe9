use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Auth Pages Router Module
///
/// Entry points classified `AuthOnly`. An authenticated visitor is redirected to their
/// dashboard before any of these handlers run.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        // GET /login renders the form; POST /login submits it to the Identity Provider.
        .route(
            "/login",
            get(handlers::login_page).post(handlers::submit_login),
        )
        .route("/register", get(handlers::register_page))
        .route("/forget-password", get(handlers::forget_password_page))
        .route("/reset-password", get(handlers::reset_password_page))
}
