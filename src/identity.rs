use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite};
use reqwest::header::SET_COOKIE;
use std::sync::Arc;

use crate::{
    error::AuthError,
    models::LoginCredentials,
    session::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE},
};

/// IssuedCookie
///
/// One credential as handed out by the Identity Provider, with the cookie attributes it asked
/// for. Missing attributes fall back to the session store's defaults. The cookie path is not
/// carried: the session store owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCookie {
    pub value: String,
    pub max_age: Option<i64>,
    pub same_site: Option<SameSite>,
}

impl IssuedCookie {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            max_age: None,
            same_site: None,
        }
    }

    fn from_cookie(cookie: &Cookie<'_>) -> Self {
        Self {
            value: cookie.value().to_string(),
            max_age: cookie.max_age().map(|age| age.whole_seconds()),
            same_site: cookie.same_site(),
        }
    }
}

/// IssuedCredentials
///
/// The access/refresh pair. It only exists when both halves were issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    pub access_token: IssuedCookie,
    pub refresh_token: IssuedCookie,
}

/// IdentityProvider Contract
///
/// Verifies an email/password pair and issues credentials. Any rejection or unusable answer
/// is an `UpstreamAuthFailure`; callers must not expose its message to end users.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedCredentials, AuthError>;
}

/// IdentityState
///
/// The shared handle to the Identity Provider held in `AppState`.
pub type IdentityState = Arc<dyn IdentityProvider>;

/// HttpIdentityProvider
///
/// Talks to the backend auth API: `POST {base_url}/auth/login` with a JSON body. The issued
/// tokens come back as `Set-Cookie` headers.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    login_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            login_url: format!("{}/auth/login", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedCredentials, AuthError> {
        let response = self
            .client
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::upstream(format!("identity provider unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::upstream(format!(
                "identity provider answered {status}"
            )));
        }

        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();

        credentials_from_set_cookies(&set_cookies)
    }
}

/// credentials_from_set_cookies
///
/// Picks the access and refresh cookies out of raw `Set-Cookie` header values. Unparseable
/// and unrelated cookies are ignored; if either half of the pair is absent the whole answer
/// is rejected so no partial session can be stored.
pub fn credentials_from_set_cookies(headers: &[String]) -> Result<IssuedCredentials, AuthError> {
    if headers.is_empty() {
        return Err(AuthError::upstream("no Set-Cookie header found"));
    }

    let mut access_token = None;
    let mut refresh_token = None;

    for raw in headers {
        let Ok(cookie) = Cookie::parse(raw.as_str()) else {
            continue;
        };
        match cookie.name() {
            ACCESS_TOKEN_COOKIE => access_token = Some(IssuedCookie::from_cookie(&cookie)),
            REFRESH_TOKEN_COOKIE => refresh_token = Some(IssuedCookie::from_cookie(&cookie)),
            _ => {}
        }
    }

    match (access_token, refresh_token) {
        (Some(access_token), Some(refresh_token)) => Ok(IssuedCredentials {
            access_token,
            refresh_token,
        }),
        (None, _) => Err(AuthError::upstream("access token not found")),
        (_, None) => Err(AuthError::upstream("refresh token not found")),
    }
}
