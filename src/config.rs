use std::env;

/// Fallback secret for local runs. Never accepted in production.
const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";
const DEFAULT_IDENTITY_PROVIDER_URL: &str = "http://localhost:5000/api/v1";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Holds the process-wide configuration. Loaded once at startup and shared read-only with
/// the gate, the token verifier and the login flow through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and cookie hardening.
    pub env: Env,
    // Symmetric key shared with the Identity Provider for HS256 token verification.
    pub jwt_secret: String,
    // Base URL of the Identity Provider API; the login call goes to `{url}/auth/login`.
    pub identity_provider_url: String,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Env
///
/// Distinguishes developer machines from deployed instances.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe values for tests; no environment variables are consulted.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            identity_provider_url: DEFAULT_IDENTITY_PROVIDER_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cookie_secure: true,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `JWT_SECRET` is missing or empty, so the gate can never start
    /// with a guessable verification key.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => env::var("JWT_SECRET")
                .ok()
                .filter(|secret| !secret.is_empty())
                .expect("FATAL: JWT_SECRET must be set in production."),
            Env::Local => env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
        };

        let identity_provider_url = env::var("IDENTITY_PROVIDER_URL")
            .unwrap_or_else(|_| DEFAULT_IDENTITY_PROVIDER_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        // Production cookies are always Secure; locally it can be switched off for plain http.
        let cookie_secure = match env {
            Env::Production => true,
            Env::Local => env::var("COOKIE_SECURE")
                .map(|value| !matches!(value.as_str(), "false" | "0"))
                .unwrap_or(true),
        };

        Self {
            env,
            jwt_secret,
            identity_provider_url,
            bind_addr,
            cookie_secure,
        }
    }
}
