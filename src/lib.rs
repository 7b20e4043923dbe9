use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod identity;
pub mod login;
pub mod models;
pub mod route_table;
pub mod session;

// Page routers grouped by access category.
pub mod routes;
use routes::{auth_pages, authenticated, dashboards, public};

// --- Public Re-exports ---

pub use auth::TokenVerifier;
pub use config::AppConfig;
pub use identity::{HttpIdentityProvider, IdentityState};
pub use route_table::RouteTable;
pub use session::{CookieSessionStore, SessionState};

/// ApiDoc
///
/// OpenAPI document for the endpoints that accept input. Served at `/api-docs/openapi.json`,
/// which the gate leaves alone.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::submit_login, handlers::logout),
    components(
        schemas(
            models::LoginForm, models::LoginErrorBody, models::FieldError,
            models::LoginOutcome, models::Role, models::PageView,
        )
    ),
    tags(
        (name = "telemedix-gate", description = "TeleMedix access gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// Everything the gate and the login flow need, built once at startup. All members are
/// immutable or trait objects behind `Arc`, so cloning per request is cheap and requests
/// share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Route classification rules.
    pub routes: Arc<RouteTable>,
    /// Access token verifier keyed with the Identity Provider's secret.
    pub verifier: Arc<TokenVerifier>,
    /// Request-scoped credential storage (cookies).
    pub sessions: SessionState,
    /// Identity Provider used by the login submission.
    pub identity: IdentityState,
}

impl AppState {
    /// Wires the production collaborators from a configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            routes: Arc::new(RouteTable::default()),
            verifier: Arc::new(TokenVerifier::new(&config.jwt_secret)),
            sessions: Arc::new(CookieSessionStore::new(config.cookie_secure)),
            identity: Arc::new(HttpIdentityProvider::new(&config.identity_provider_url)),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// Lets handlers that only touch the session store ask for just that.
impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

/// create_router
///
/// Assembles the page routers, puts the authorization gate in front of all of them (the
/// fallback included) and adds the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(auth_pages::auth_routes())
        .merge(authenticated::authenticated_routes())
        .merge(dashboards::dashboard_routes())
        // The gate sees every request, so classification alone decides access.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::gate_middleware,
        ))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span with method, uri and the `x-request-id` so gate decisions
/// logged inside it can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
