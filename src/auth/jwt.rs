// Bearer token extraction and verification
// Tokens are issued by the identity provider and signed with keys it publishes

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;
use super::jwks::KeyStore;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (caller id at the identity provider)
/// * `exp` - Expiry time (seconds since epoch)
/// * `permissions` - Scopes granted to the caller, absent on tokens
///   issued without RBAC
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Granted permissions, empty when the claim is absent
    pub fn permissions(&self) -> &[String] {
        self.permissions.as_deref().unwrap_or(&[])
    }

    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("unknown")
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
///
/// The header must consist of exactly two space-separated parts and the
/// scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Authorization header must be valid text."))?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(*token)
        }
        [scheme, _] if scheme.eq_ignore_ascii_case("bearer") => {
            Err(AuthError::InvalidHeader("Token not found."))
        }
        [_, _] => Err(AuthError::InvalidHeader(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::InvalidHeader("Token not found.")),
        _ => Err(AuthError::InvalidHeader(
            "Authorization header must be bearer token.",
        )),
    }
}

/// Verifies bearer tokens against the identity provider's keys
///
/// Checks signature, expiry, issuer and audience. Only the configured
/// signing algorithms are accepted.
pub struct TokenValidator {
    keys: Arc<dyn KeyStore>,
    validation: Validation,
}

impl TokenValidator {
    /// Creates a validator
    ///
    /// # Arguments
    /// * `issuer` - Expected `iss` claim, e.g. `https://tenant.auth0.com/`
    /// * `audience` - Expected `aud` claim
    /// * `algorithms` - Accepted signing algorithms; `RS256` when empty
    /// * `keys` - Where verification keys are looked up by `kid`
    pub fn new(
        issuer: &str,
        audience: &str,
        algorithms: Vec<Algorithm>,
        keys: Arc<dyn KeyStore>,
    ) -> Self {
        let algorithms = if algorithms.is_empty() {
            vec![Algorithm::RS256]
        } else {
            algorithms
        };

        let mut validation = Validation::new(algorithms[0]);
        validation.algorithms = algorithms;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        Self { keys, validation }
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    /// * `Ok(Claims)` - The decoded claims if the token is valid
    /// * `Err(AuthError)` - 400 if the token cannot be parsed, 401 for any
    ///   verification failure
    pub async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let key = self
            .keys
            .decoding_key(&kid)
            .await?
            .ok_or(AuthError::UnknownKey)?;

        decode::<Claims>(token, &key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(kid = %kid, error = %e, "token rejected");
                classify(e.kind())
            })
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    }
}
