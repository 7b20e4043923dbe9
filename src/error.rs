use crate::models::Role;

/// AuthError
///
/// Every way an access check or a login can fail. None of these ever reach the end user as
/// a fault: the gate recovers each one as a redirect, and the login flow recovers
/// `UpstreamAuthFailure` as a generic form error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Signature mismatch, malformed payload, elapsed expiry or a missing/unknown role.
    /// The cause is deliberately not carried.
    #[error("token invalid")]
    TokenInvalid,

    /// A protected route was requested without any usable credential.
    #[error("credential missing")]
    CredentialMissing,

    /// The identity is valid but owns a different part of the site.
    #[error("role mismatch: route requires {required}, token carries {actual}")]
    RoleMismatch { required: Role, actual: Role },

    /// The Identity Provider rejected the credentials or answered with something unusable.
    #[error("upstream auth failure: {0}")]
    UpstreamAuthFailure(String),
}

impl AuthError {
    pub fn upstream(message: impl Into<String>) -> Self {
        AuthError::UpstreamAuthFailure(message.into())
    }
}
