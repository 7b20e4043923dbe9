use telemedix_gate::{
    AppState,
    config::{AppConfig, Env},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, installs logging, builds the shared state and serves the gated
/// router until the process is stopped.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production secrets)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise debug for this crate.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "telemedix_gate=debug,tower_http=info,axum=trace".into());

    // 3. Pretty logs on a developer machine, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    tracing::info!(
        identity_provider = %config.identity_provider_url,
        cookie_secure = config.cookie_secure,
        "Identity Provider configured"
    );

    // 4. Shared state: route table, verifier, session store, identity provider.
    let bind_addr = &config.bind_addr;
    let app_state = AppState::from_config(&config);

    // 5. Router and server
    let app = create_router(app_state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!(
        "API Documentation (Swagger UI) available at: http://{}/swagger-ui",
        bind_addr
    );

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
