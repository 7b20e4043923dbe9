use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, request::Parts},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;
use std::time::SystemTime;
use telemedix_gate::{
    TokenVerifier,
    auth::{Claims, SessionUser},
    error::AuthError,
    models::Role,
};

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

fn now() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn sign(payload: &serde_json::Value, secret: &str) -> String {
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), payload, &key).unwrap()
}

fn create_token(role: &str, exp_offset: i64) -> String {
    let now = now();
    sign(
        &json!({
            "role": role,
            "iat": now,
            "exp": now + exp_offset,
            "email": "someone@telemedix.test",
        }),
        TEST_JWT_SECRET,
    )
}

fn get_request_parts() -> Parts {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/my-profile")
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- TokenVerifier ---

#[test]
fn test_verify_accepts_valid_token_for_every_role() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);

    for (raw, role) in [
        ("ADMIN", Role::Admin),
        ("DOCTOR", Role::Doctor),
        ("PATIENT", Role::Patient),
    ] {
        let claims = verifier.verify(&create_token(raw, 3600)).unwrap();
        assert_eq!(claims.role, role);
        assert_eq!(claims.email.as_deref(), Some("someone@telemedix.test"));
    }
}

#[test]
fn test_verify_rejects_expired_token() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);
    // Well past the default leeway.
    let token = create_token("PATIENT", -3600);

    assert_eq!(verifier.verify(&token), Err(AuthError::TokenInvalid));
}

#[test]
fn test_verify_rejects_wrong_signature() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);
    let now = now();
    let token = sign(
        &json!({ "role": "ADMIN", "iat": now, "exp": now + 3600 }),
        "some-other-secret",
    );

    assert_eq!(verifier.verify(&token), Err(AuthError::TokenInvalid));
}

#[test]
fn test_verify_rejects_missing_role() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);
    let now = now();
    let token = sign(&json!({ "iat": now, "exp": now + 3600 }), TEST_JWT_SECRET);

    assert_eq!(verifier.verify(&token), Err(AuthError::TokenInvalid));
}

#[test]
fn test_verify_rejects_unknown_role() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);

    for role in ["SUPER_ADMIN", "admin", ""] {
        assert_eq!(
            verifier.verify(&create_token(role, 3600)),
            Err(AuthError::TokenInvalid),
            "role {role:?}"
        );
    }
}

#[test]
fn test_verify_rejects_missing_expiry() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);
    let token = sign(&json!({ "role": "DOCTOR" }), TEST_JWT_SECRET);

    assert_eq!(verifier.verify(&token), Err(AuthError::TokenInvalid));
}

#[test]
fn test_verify_rejects_malformed_input() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);

    for token in ["", "not-a-jwt", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30"] {
        assert_eq!(verifier.verify(token), Err(AuthError::TokenInvalid));
    }
}

#[test]
fn test_verify_rejects_other_algorithms() {
    let verifier = TokenVerifier::new(TEST_JWT_SECRET);
    let now = now();
    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    let token = encode(
        &Header::new(Algorithm::HS512),
        &json!({ "role": "ADMIN", "exp": now + 3600 }),
        &key,
    )
    .unwrap();

    assert_eq!(verifier.verify(&token), Err(AuthError::TokenInvalid));
}

// --- SessionUser Extractor ---

#[tokio::test]
async fn test_session_user_reads_claims_left_by_gate() {
    let mut parts = get_request_parts();
    parts.extensions.insert(Claims {
        role: Role::Doctor,
        exp: 4_102_444_800,
        iat: None,
        sub: None,
        email: Some("doc@telemedix.test".to_string()),
    });

    let user = SessionUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.role, Role::Doctor);
    assert_eq!(user.email.as_deref(), Some("doc@telemedix.test"));
}

#[tokio::test]
async fn test_session_user_rejects_without_claims() {
    let mut parts = get_request_parts();

    let result = SessionUser::from_request_parts(&mut parts, &()).await;

    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}
