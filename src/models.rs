use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Identity ---

/// Role
///
/// The closed set of roles asserted by the Identity Provider inside the token's `role` claim.
/// Deserialization is the validation step: any string other than these three is rejected,
/// which makes the whole token invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Doctor, Role::Patient];

    /// The wire spelling used in the token claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Patient => "PATIENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Login Submission (Input Schemas) ---

/// LoginForm
///
/// The form submitted to `POST /login`. `redirect` carries the path the gate originally
/// bounced the user away from, and is only honoured after role validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// LoginCredentials
///
/// JSON body forwarded to the Identity Provider's login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

// --- Login Results (Output Schemas) ---

/// FieldError
///
/// A single form error. Upstream failures use the pseudo-field `server`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// LoginOutcome
///
/// The explicit result of a login submission. The HTTP handler turns `Success` into a
/// redirect and the two failure variants into a JSON form-state body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum LoginOutcome {
    Success { redirect: String },
    ValidationError { errors: Vec<FieldError> },
    UpstreamError { message: String },
}

/// LoginErrorBody
///
/// The form-state shape the login page expects when the submission did not succeed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginErrorBody {
    pub success: bool,
    pub errors: Vec<FieldError>,
}

// --- Placeholder Pages ---

/// PageView
///
/// Minimal description of a rendered page. Real markup is produced by the frontend; the
/// backend only reports which page was reached and as whom.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageView {
    pub page: String,
    pub role: Option<Role>,
}

impl PageView {
    pub fn anonymous(page: &str) -> Self {
        Self {
            page: page.to_string(),
            role: None,
        }
    }

    pub fn for_role(page: &str, role: Role) -> Self {
        Self {
            page: page.to_string(),
            role: Some(role),
        }
    }
}
