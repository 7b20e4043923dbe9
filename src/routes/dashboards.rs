use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Dashboards Router Module
///
/// One landing page per role. The paths double as the role homes the gate redirects to, so
/// they must stay in step with `gate::default_home_for`.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard (ADMIN only)
        .route("/admin/dashboard", get(handlers::admin_dashboard))
        // GET /doctor/dashboard (DOCTOR only)
        .route("/doctor/dashboard", get(handlers::doctor_dashboard))
        // GET /dashboard (PATIENT only)
        .route("/dashboard", get(handlers::patient_dashboard))
}
