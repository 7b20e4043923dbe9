use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::{error::AuthError, models::Role};

/// Claims
///
/// The payload the Identity Provider signs into every access token. Only `role` and `exp`
/// are mandatory; the remaining fields are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Role asserted at issuance. An unknown spelling fails deserialization, and with it
    /// the whole token.
    pub role: Role,
    /// Expiration Time (exp): seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    /// Subject (sub): the Identity Provider's user id, when it sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// TokenVerifier
///
/// Holds the decoding key and validation rules, built once from `AppConfig::jwt_secret`.
/// Verification is a pure CPU-bound check with no I/O.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is always enforced; a token without `exp` is malformed.
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// verify
    ///
    /// Returns the claim set, or `TokenInvalid` for any failure. The specific cause is
    /// only traced, never returned.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("access token expired"),
                    ErrorKind::InvalidSignature => tracing::debug!("access token signature mismatch"),
                    kind => tracing::debug!(?kind, "access token rejected"),
                }
                Err(AuthError::TokenInvalid)
            }
        }
    }
}

/// SessionUser
///
/// The verified identity of the current request, as established by the gate middleware.
/// Handlers behind a protected route take this as an argument.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub role: Role,
    pub email: Option<String>,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            role: claims.role,
            email: claims.email,
        }
    }
}

/// SessionUser Extractor
///
/// Reads the `Claims` the gate stored in the request extensions. It never decodes the cookie
/// itself, so a handler can only see identities the gate already accepted.
///
/// Rejection: `401 Unauthorized` when the handler is mounted on a path the gate let through
/// without a token (a public path).
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(SessionUser::from)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
