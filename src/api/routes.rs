use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::api::handlers::{drinks, health};
use crate::api::middleware::{require_permission, PermissionGuard};
use crate::api::state::AppState;
use crate::auth::permissions::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};

/// Builds the route table
///
/// Protected method routes carry their own permission layer, so a public
/// and a protected method can share a path.
pub fn router(state: AppState) -> Router {
    let validator = state.validator.clone();
    let guard = |permission: &'static str| {
        middleware::from_fn_with_state(
            PermissionGuard::new(validator.clone(), permission),
            require_permission,
        )
    };

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/login-results", get(health::login_results))
        // Drink routes
        .route("/drinks", get(drinks::list_drinks))
        .route(
            "/drinks",
            post(drinks::create_drink).route_layer(guard(POST_DRINKS)),
        )
        .route(
            "/drinks-detail",
            get(drinks::drinks_detail).route_layer(guard(GET_DRINKS_DETAIL)),
        )
        .route(
            "/drinks/:id",
            patch(drinks::update_drink).route_layer(guard(PATCH_DRINKS)),
        )
        .route(
            "/drinks/:id",
            delete(drinks::delete_drink).route_layer(guard(DELETE_DRINKS)),
        )
        .method_not_allowed_fallback(health::method_not_allowed)
        .fallback(health::not_found)
        // Shared state
        .with_state(state)
}
