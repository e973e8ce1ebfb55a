use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised while authenticating a request or checking its permissions
///
/// Each variant carries a fixed status and a short machine-readable code
/// which are forwarded to the client.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("{0}")]
    InvalidHeader(&'static str),

    #[error("Unable to parse authentication token.")]
    MalformedToken,

    #[error("Authorization malformed.")]
    MissingKeyId,

    #[error("Unable to find the appropriate key.")]
    UnknownKey,

    #[error("Token expired.")]
    Expired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Token signature verification failed.")]
    InvalidSignature,

    #[error("Permissions not included in JWT.")]
    MissingPermissions,

    #[error("Permission not found.")]
    Forbidden,

    #[error("Signing keys are unavailable: {0}")]
    KeyFetch(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MalformedToken | AuthError::MissingPermissions => StatusCode::BAD_REQUEST,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::KeyFetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::InvalidHeader(_)
            | AuthError::MalformedToken
            | AuthError::MissingKeyId
            | AuthError::UnknownKey => "invalid_header",
            AuthError::Expired => "token_expired",
            AuthError::InvalidClaims | AuthError::MissingPermissions => "invalid_claims",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Forbidden => "unauthorized",
            AuthError::KeyFetch(_) => "jwks_unavailable",
        }
    }
}
