use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::Claims;
use crate::domain::drink::{DrinkLong, DrinkShort, NewDrink, Recipe};
use crate::domain::repositories::RepositoryError;

/// Request body for creating a drink
///
/// Both fields are required; they are optional here so a missing field
/// can be answered with 422 instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Value>,
}

/// Request body for editing a drink; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Value>,
}

/// Response carrying a list of drinks in either projection
#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// Response from drink deletion
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i32,
}

fn store_error(error: RepositoryError) -> ApiError {
    match error {
        RepositoryError::Missing(id) => ApiError::not_found(format!("Drink #{} not found", id)),
        other => {
            tracing::error!(error = %other, "drink store failure");
            ApiError::internal_server_error("An error occurred")
        }
    }
}

fn body_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(_) => ApiError::unprocessable("Unprocessable"),
        _ => ApiError::bad_request("Check the body request"),
    }
}

fn drink_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("resource not found"))
}

/// List all drinks without ingredient names
///
/// GET /drinks
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<DrinkShort>>, ApiError> {
    let drinks = state.drinks.list_all().await.map_err(store_error)?;

    Ok(Json(DrinksResponse::new(
        drinks.iter().map(|drink| drink.short()).collect(),
    )))
}

/// List all drinks with full recipes
///
/// GET /drinks-detail
pub async fn drinks_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let drinks = state.drinks.list_all().await.map_err(store_error)?;
    tracing::debug!(subject = claims.subject(), count = drinks.len(), "drink details listed");

    Ok(Json(DrinksResponse::new(
        drinks.iter().map(|drink| drink.long()).collect(),
    )))
}

/// Create a new drink
///
/// POST /drinks
pub async fn create_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let Json(req) = payload.map_err(body_error)?;

    let (Some(title), Some(recipe)) = (req.title, req.recipe) else {
        return Err(ApiError::unprocessable("Unprocessable"));
    };

    let recipe = Recipe::from_json(recipe).map_err(ApiError::unprocessable)?;
    let draft = NewDrink::new(title, recipe).map_err(ApiError::unprocessable)?;

    let drink = state.drinks.insert(draft).await.map_err(store_error)?;
    tracing::info!(subject = claims.subject(), drink_id = drink.id(), "drink created");

    Ok(Json(DrinksResponse::new(vec![drink.long()])))
}

/// Edit the title and/or recipe of a drink
///
/// PATCH /drinks/:id
pub async fn update_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let id = drink_id(path)?;

    let mut drink = state
        .drinks
        .find_by_id(id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| ApiError::not_found(format!("Drink #{} not found to be edited", id)))?;

    let Json(req) = payload.map_err(body_error)?;

    if let Some(title) = req.title {
        drink.rename(title).map_err(ApiError::unprocessable)?;
    }
    if let Some(recipe) = req.recipe {
        drink.set_recipe(Recipe::from_json(recipe).map_err(ApiError::unprocessable)?);
    }

    state.drinks.update(&drink).await.map_err(store_error)?;
    tracing::info!(subject = claims.subject(), drink_id = id, "drink updated");

    Ok(Json(DrinksResponse::new(vec![drink.long()])))
}

/// Delete a drink
///
/// DELETE /drinks/:id
pub async fn delete_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = drink_id(path)?;

    let drink = state
        .drinks
        .find_by_id(id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| ApiError::not_found(format!("Drink #{} not found", id)))?;

    state.drinks.delete(&drink).await.map_err(store_error)?;
    tracing::info!(subject = claims.subject(), drink_id = id, "drink deleted");

    Ok(Json(DeleteResponse {
        success: true,
        delete: drink.id(),
    }))
}
