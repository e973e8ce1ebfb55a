use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::errors::ApiError;
use crate::auth::permissions::check_permission;
use crate::auth::{bearer_token, TokenValidator};

/// State for [`require_permission`]: the validator and the permission a
/// route demands
#[derive(Clone)]
pub struct PermissionGuard {
    pub validator: Arc<TokenValidator>,
    pub permission: &'static str,
}

impl PermissionGuard {
    pub fn new(validator: Arc<TokenValidator>, permission: &'static str) -> Self {
        Self {
            validator,
            permission,
        }
    }
}

/// Middleware gating a route on a granted permission
///
/// Validates the bearer token, checks the permission and stores the
/// decoded [`Claims`](crate::auth::Claims) in request extensions before
/// the handler runs.
///
/// Usage:
/// ```rust,ignore
/// post(create_drink).route_layer(middleware::from_fn_with_state(
///     PermissionGuard::new(validator, POST_DRINKS),
///     require_permission,
/// ))
/// ```
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?.to_owned();
    let claims = guard.validator.validate(&token).await?;

    check_permission(guard.permission, &claims).map_err(|e| {
        tracing::info!(
            subject = claims.subject(),
            permission = guard.permission,
            "permission denied"
        );
        e
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
