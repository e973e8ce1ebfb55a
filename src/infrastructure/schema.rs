// Table bootstrap for the drink store
// Migrations are managed outside this service; this only guarantees the
// table exists and optionally resets it to a single sample drink.

use sqlx::PgPool;

use crate::domain::drink::{Ingredient, Recipe};
use crate::domain::repositories::RepositoryError;

const CREATE_DRINK_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drink (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        recipe TEXT NOT NULL
    )
"#;

/// Creates the `drink` table if it does not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_DRINK_TABLE).execute(pool).await?;
    Ok(())
}

/// Drops and recreates the `drink` table, then inserts the sample drink
///
/// All existing rows are lost.
pub async fn reset_with_seed(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("DROP TABLE IF EXISTS drink").execute(pool).await?;
    ensure_schema(pool).await?;

    sqlx::query("INSERT INTO drink (title, recipe) VALUES ($1, $2)")
        .bind(SAMPLE_TITLE)
        .bind(sample_recipe().to_stored()?)
        .execute(pool)
        .await?;

    tracing::info!("drink table reset and seeded");
    Ok(())
}

const SAMPLE_TITLE: &str = "water";

/// Recipe of the drink a fresh store starts with
pub fn sample_recipe() -> Recipe {
    Recipe::new(vec![Ingredient::new("water", "blue", 1)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_recipe_is_a_single_blue_water() {
        let stored = sample_recipe().to_stored().unwrap();
        assert_eq!(stored, r#"[{"name":"water","color":"blue","parts":1}]"#);
    }
}
