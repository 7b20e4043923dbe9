use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Pages classified `CommonProtected`: any verified role may open them. Handlers receive
/// the identity through the `SessionUser` extractor.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/my-profile", get(handlers::my_profile_page))
        .route("/setting", get(handlers::setting_page))
}
