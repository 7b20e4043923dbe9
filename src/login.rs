use axum::http::uri::PathAndQuery;
use axum_extra::extract::cookie::CookieJar;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    auth::TokenVerifier,
    gate::{default_home_for, is_valid_redirect_for_role},
    identity::IdentityProvider,
    models::{FieldError, LoginCredentials, LoginForm, LoginOutcome, Role},
    route_table::RouteTable,
    session::SessionStore,
};

/// The only message an end user ever sees for an upstream failure.
pub const GENERIC_LOGIN_FAILURE: &str = "Login failed";
const PASSWORD_MIN: usize = 4;
const PASSWORD_MAX: usize = 50;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// validate_form
///
/// Shape checks only; whether the credentials are correct is the Identity Provider's call.
pub fn validate_form(form: &LoginForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !EMAIL_PATTERN.is_match(form.email.trim()) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    let length = form.password.chars().count();
    if length < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 4 characters",
        ));
    } else if length > PASSWORD_MAX {
        errors.push(FieldError::new(
            "password",
            "Password must be less than 50 characters",
        ));
    }

    errors
}

/// resolve_redirect
///
/// Chooses where a freshly authenticated user goes. A requested target is honoured only if it
/// is a local absolute path and does not belong to another role; anything else falls back to
/// the role's home.
pub fn resolve_redirect(routes: &RouteTable, requested: Option<&str>, role: Role) -> String {
    let requested = requested.map(str::trim).filter(|path| !path.is_empty());

    match requested {
        Some(path) if is_local_path(path) && is_valid_redirect_for_role(routes, path, role) => {
            path.to_string()
        }
        Some(path) => {
            tracing::debug!(requested = %path, %role, "post-login redirect rejected");
            default_home_for(role).to_string()
        }
        None => default_home_for(role).to_string(),
    }
}

// Rejects absolute URLs, protocol-relative `//host` forms, backslash tricks and anything that
// cannot be sent back as a `Location` header.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && path.bytes().all(|b| b.is_ascii_graphic())
        && path.parse::<PathAndQuery>().is_ok()
}

/// LoginFlow
///
/// The login submission use case, borrowing the shared components from `AppState`.
pub struct LoginFlow<'a> {
    pub identity: &'a dyn IdentityProvider,
    pub verifier: &'a TokenVerifier,
    pub routes: &'a RouteTable,
    pub sessions: &'a dyn SessionStore,
}

impl LoginFlow<'_> {
    /// submit
    ///
    /// Validates the form, asks the Identity Provider for credentials, checks the issued
    /// access token and only then stores the pair. The jar comes back untouched unless the
    /// outcome is `Success`.
    pub async fn submit(&self, jar: CookieJar, form: LoginForm) -> (CookieJar, LoginOutcome) {
        let errors = validate_form(&form);
        if !errors.is_empty() {
            return (jar, LoginOutcome::ValidationError { errors });
        }

        let credentials = LoginCredentials {
            email: form.email.trim().to_string(),
            password: form.password,
        };

        let issued = match self.identity.login(&credentials).await {
            Ok(issued) => issued,
            Err(e) => {
                tracing::warn!(error = %e, "login rejected by identity provider");
                return (jar, upstream_error());
            }
        };

        let claims = match self.verifier.verify(&issued.access_token.value) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, "identity provider issued an unusable access token");
                return (jar, upstream_error());
            }
        };

        let redirect = resolve_redirect(self.routes, form.redirect.as_deref(), claims.role);
        tracing::info!(role = %claims.role, %redirect, "login succeeded");

        let jar = self.sessions.store(jar, &issued);
        (jar, LoginOutcome::Success { redirect })
    }
}

fn upstream_error() -> LoginOutcome {
    LoginOutcome::UpstreamError {
        message: GENERIC_LOGIN_FAILURE.to_string(),
    }
}
