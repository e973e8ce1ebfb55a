use async_trait::async_trait;
use thiserror::Error;

use crate::domain::drink::{Drink, NewDrink};

/// Errors surfaced by drink repositories
///
/// Callers treat every variant as a failure of the current request.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored recipe for drink {id} is not valid: {source}")]
    CorruptRecipe {
        id: i32,
        #[source]
        source: serde_json::Error,
    },

    #[error("recipe could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("drink {0} no longer exists")]
    Missing(i32),
}

/// Repository trait for the Drink entity
///
/// Defines the contract for persisting and retrieving drinks.
/// Implementations own persistence exclusively; handlers keep no state.
#[async_trait]
pub trait DrinkRepository: Send + Sync {
    /// List every drink, ordered by id ascending
    async fn list_all(&self) -> Result<Vec<Drink>, RepositoryError>;

    /// Find a drink by its ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Drink>, RepositoryError>;

    /// Insert a new drink; the store assigns the id
    async fn insert(&self, drink: NewDrink) -> Result<Drink, RepositoryError>;

    /// Persist the current state of an already loaded drink
    async fn update(&self, drink: &Drink) -> Result<(), RepositoryError>;

    /// Remove a drink
    async fn delete(&self, drink: &Drink) -> Result<(), RepositoryError>;
}
