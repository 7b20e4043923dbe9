use serde_json::json;
use telemedix_gate::models::{FieldError, LoginForm, LoginOutcome, Role};

#[test]
fn test_role_uses_claim_spelling() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("ADMIN"));
    assert_eq!(serde_json::to_value(Role::Doctor).unwrap(), json!("DOCTOR"));
    assert_eq!(serde_json::to_value(Role::Patient).unwrap(), json!("PATIENT"));

    for role in Role::ALL {
        assert_eq!(role.to_string(), role.as_str());
    }
}

#[test]
fn test_role_rejects_unknown_spellings() {
    for raw in ["admin", "Patient", "NURSE", ""] {
        assert!(serde_json::from_value::<Role>(json!(raw)).is_err(), "{raw:?}");
    }
}

#[test]
fn test_login_outcome_json_is_tagged() {
    let success = LoginOutcome::Success {
        redirect: "/dashboard".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&success).unwrap(),
        json!({ "status": "success", "redirect": "/dashboard" })
    );

    let invalid = LoginOutcome::ValidationError {
        errors: vec![FieldError::new("email", "Invalid email address")],
    };
    assert_eq!(
        serde_json::to_value(&invalid).unwrap(),
        json!({
            "status": "validation_error",
            "errors": [{ "field": "email", "message": "Invalid email address" }]
        })
    );
}

#[test]
fn test_login_form_redirect_is_optional() {
    let form: LoginForm =
        serde_json::from_value(json!({ "email": "a@b.co", "password": "abcd" })).unwrap();

    assert_eq!(form.redirect, None);
}
