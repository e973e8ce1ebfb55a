// Permission names granted by the identity provider and the membership check

use super::errors::AuthError;
use super::jwt::Claims;

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

/// Checks that `claims` grant `permission`
///
/// # Returns
/// * `Err(AuthError::MissingPermissions)` - The token has no `permissions` claim (400)
/// * `Err(AuthError::Forbidden)` - The permission is not granted (403)
pub fn check_permission(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::MissingPermissions)?;

    if !granted.iter().any(|p| p == permission) {
        return Err(AuthError::Forbidden);
    }

    Ok(())
}
