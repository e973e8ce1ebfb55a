use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::drink::{Drink, NewDrink, Recipe};
use crate::domain::repositories::{DrinkRepository, RepositoryError};

/// Row shape of the `drink` table
#[derive(Debug, sqlx::FromRow)]
struct DrinkRow {
    id: i32,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = RepositoryError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe = Recipe::from_stored(&row.recipe).map_err(|source| {
            RepositoryError::CorruptRecipe {
                id: row.id,
                source,
            }
        })?;
        Ok(Drink::from_persistence(row.id, row.title, recipe))
    }
}

/// PostgreSQL implementation of DrinkRepository
///
/// Recipes are stored as serialized JSON text in the `recipe` column.
pub struct PostgresDrinkRepository {
    pool: PgPool,
}

impl PostgresDrinkRepository {
    /// Creates a new PostgresDrinkRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrinkRepository for PostgresDrinkRepository {
    async fn list_all(&self) -> Result<Vec<Drink>, RepositoryError> {
        let rows = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drink
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Drink::try_from).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Drink>, RepositoryError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drink
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Drink::try_from).transpose()
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, RepositoryError> {
        let recipe = drink.recipe().to_stored()?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO drink (title, recipe)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(drink.title())
        .bind(recipe)
        .fetch_one(&self.pool)
        .await?;

        Ok(drink.into_drink(id))
    }

    async fn update(&self, drink: &Drink) -> Result<(), RepositoryError> {
        let recipe = drink.recipe().to_stored()?;

        let result = sqlx::query(
            r#"
            UPDATE drink
            SET title = $2, recipe = $3
            WHERE id = $1
            "#,
        )
        .bind(drink.id())
        .bind(drink.title())
        .bind(recipe)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Missing(drink.id()));
        }

        Ok(())
    }

    async fn delete(&self, drink: &Drink) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drink WHERE id = $1
            "#,
        )
        .bind(drink.id())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Missing(drink.id()));
        }

        Ok(())
    }
}
