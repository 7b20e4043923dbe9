use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use time::Duration;

use crate::identity::{IssuedCookie, IssuedCredentials};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
/// Both credentials are always written and removed on this path.
const SESSION_COOKIE_PATH: &str = "/";

/// Used when the Identity Provider omits `Max-Age` on the access cookie.
const DEFAULT_ACCESS_MAX_AGE_SECS: i64 = 60 * 60;
/// Used when the Identity Provider omits `Max-Age` on the refresh cookie.
const DEFAULT_REFRESH_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 90;

/// SessionStore Contract
///
/// Request-scoped credential storage. The store works on the request's `CookieJar` and hands
/// back an updated jar, which the caller returns as part of the response; that is what makes a
/// purge land before the client sees the decision.
///
/// The access and refresh credentials are always written and purged together.
pub trait SessionStore: Send + Sync {
    /// The raw access token carried by the request, if any.
    fn access_token(&self, jar: &CookieJar) -> Option<String>;

    /// Persists both issued credentials.
    fn store(&self, jar: CookieJar, credentials: &IssuedCredentials) -> CookieJar;

    /// Removes both credentials.
    fn purge(&self, jar: CookieJar) -> CookieJar;
}

/// CookieSessionStore
///
/// The production store: `HttpOnly` cookies named `accessToken` and `refreshToken`.
#[derive(Clone, Debug)]
pub struct CookieSessionStore {
    secure: bool,
}

impl CookieSessionStore {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn session_cookie(
        &self,
        name: &'static str,
        issued: &IssuedCookie,
        default_max_age: i64,
    ) -> Cookie<'static> {
        Cookie::build((name, issued.value.clone()))
            .http_only(true)
            .secure(self.secure)
            .path(SESSION_COOKIE_PATH)
            .same_site(issued.same_site.unwrap_or(SameSite::None))
            .max_age(Duration::seconds(issued.max_age.unwrap_or(default_max_age)))
            .build()
    }
}

impl SessionStore for CookieSessionStore {
    fn access_token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn store(&self, jar: CookieJar, credentials: &IssuedCredentials) -> CookieJar {
        jar.add(self.session_cookie(
            ACCESS_TOKEN_COOKIE,
            &credentials.access_token,
            DEFAULT_ACCESS_MAX_AGE_SECS,
        ))
        .add(self.session_cookie(
            REFRESH_TOKEN_COOKIE,
            &credentials.refresh_token,
            DEFAULT_REFRESH_MAX_AGE_SECS,
        ))
    }

    fn purge(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path(SESSION_COOKIE_PATH))
            .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path(SESSION_COOKIE_PATH))
    }
}

/// SessionState
///
/// The shared handle to the session store held in `AppState`.
pub type SessionState = Arc<dyn SessionStore>;
