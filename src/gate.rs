use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use url::form_urlencoded;

use crate::{
    AppState,
    auth::Claims,
    error::AuthError,
    models::Role,
    route_table::{RouteCategory, RouteTable},
};

pub const LOGIN_PATH: &str = "/login";
/// Query parameter carrying the originally requested path through the login page.
pub const REDIRECT_PARAM: &str = "redirect";

/// AuthDecision
///
/// The gate's verdict for one request. Computed fresh every time and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    RedirectTo {
        path: String,
        query: Vec<(String, String)>,
    },
}

impl AuthDecision {
    fn redirect(path: &str) -> Self {
        AuthDecision::RedirectTo {
            path: path.to_string(),
            query: Vec::new(),
        }
    }

    fn login_with_return_to(requested: &str) -> Self {
        AuthDecision::RedirectTo {
            path: LOGIN_PATH.to_string(),
            query: vec![(REDIRECT_PARAM.to_string(), requested.to_string())],
        }
    }

    /// The `Location` value for a redirect, with the query percent-encoded.
    /// `None` for `Allow`.
    pub fn location(&self) -> Option<String> {
        match self {
            AuthDecision::Allow => None,
            AuthDecision::RedirectTo { path, query } if query.is_empty() => Some(path.clone()),
            AuthDecision::RedirectTo { path, query } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query.iter())
                    .finish();
                Some(format!("{path}?{encoded}"))
            }
        }
    }
}

/// default_home_for
///
/// Where each role lands after login or when it wanders into someone else's area.
pub fn default_home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::Doctor => "/doctor/dashboard",
        Role::Patient => "/dashboard",
    }
}

/// authorize
///
/// Decides one request. `token` is `None` both when no credential was sent and when the
/// credential failed verification. The checks run in a fixed order: an authenticated user is
/// bounced off auth pages first, then anonymous users are kept out of gated content, and only
/// then are roles compared.
pub fn authorize(category: RouteCategory, path: &str, token: Option<&Claims>) -> AuthDecision {
    match (category, token) {
        (RouteCategory::AuthOnly, Some(claims)) => {
            tracing::debug!(%path, role = %claims.role, "authenticated user sent away from auth page");
            AuthDecision::redirect(default_home_for(claims.role))
        }
        (RouteCategory::CommonProtected | RouteCategory::RoleProtected(_), None) => {
            tracing::debug!(%path, reason = %AuthError::CredentialMissing, "redirecting to login");
            AuthDecision::login_with_return_to(path)
        }
        (RouteCategory::Public, _) | (RouteCategory::AuthOnly, None) => AuthDecision::Allow,
        // Any authenticated role may use the shared pages.
        (RouteCategory::CommonProtected, Some(_)) => AuthDecision::Allow,
        (RouteCategory::RoleProtected(required), Some(claims)) if claims.role == required => {
            AuthDecision::Allow
        }
        (RouteCategory::RoleProtected(required), Some(claims)) => {
            let reason = AuthError::RoleMismatch {
                required,
                actual: claims.role,
            };
            tracing::debug!(%path, %reason, "redirecting to own dashboard");
            AuthDecision::redirect(default_home_for(claims.role))
        }
    }
}

/// is_valid_redirect_for_role
///
/// Whether a post-login `redirect` target may be honoured for this role. Everything except
/// another role's area is acceptable.
pub fn is_valid_redirect_for_role(routes: &RouteTable, redirect: &str, role: Role) -> bool {
    match routes.classify(redirect) {
        RouteCategory::Public | RouteCategory::AuthOnly | RouteCategory::CommonProtected => true,
        RouteCategory::RoleProtected(owner) => owner == role,
    }
}

/// gate_middleware
///
/// Runs the classifier and `authorize` in front of every gated request.
///
/// A credential that fails verification is purged from the session store and the request
/// continues as anonymous. The purge is carried by this very response, whether it ends up a
/// redirect or the downstream page, and downstream handlers no longer see the purged cookies.
/// Verified claims are stored in the request extensions for the `SessionUser` extractor.
pub async fn gate_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !state.routes.is_gated(&path) {
        return next.run(request).await;
    }

    let category = state.routes.classify(&path);

    let (claims, jar) = match state.sessions.access_token(&jar) {
        None => (None, jar),
        Some(raw) => match state.verifier.verify(&raw) {
            Ok(claims) => (Some(claims), jar),
            Err(reason) => {
                tracing::info!(%path, %reason, "purging stored session");
                let jar = state.sessions.purge(jar);
                replace_request_cookies(&mut request, &jar);
                (None, jar)
            }
        },
    };

    let decision = authorize(category, &path, claims.as_ref());

    match decision.location() {
        None => {
            if let Some(claims) = claims {
                request.extensions_mut().insert(claims);
            }
            let response = next.run(request).await;
            with_purge_first(jar, response)
        }
        // A form post must not be replayed against the redirect target.
        Some(location) if is_replay_safe(request.method()) => {
            (jar, Redirect::temporary(&location)).into_response()
        }
        Some(location) => (jar, Redirect::to(&location)).into_response(),
    }
}

fn is_replay_safe(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

// Rewrites the request `Cookie` header to what is left in the jar after a purge.
fn replace_request_cookies(request: &mut Request, jar: &CookieJar) {
    let remaining = jar
        .iter()
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
        .collect::<Vec<_>>()
        .join("; ");

    let headers = request.headers_mut();
    headers.remove(header::COOKIE);
    if remaining.is_empty() {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(&remaining) {
        headers.insert(header::COOKIE, value);
    }
}

// Emits the gate's Set-Cookie headers before the handler's, so a cookie the handler sets
// again (a fresh login) is the one the client keeps.
fn with_purge_first(jar: CookieJar, response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    let downstream: Vec<HeaderValue> = parts
        .headers
        .get_all(header::SET_COOKIE)
        .iter()
        .cloned()
        .collect();
    parts.headers.remove(header::SET_COOKIE);

    let mut response = (jar, Response::from_parts(parts, body)).into_response();
    for value in downstream {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}
