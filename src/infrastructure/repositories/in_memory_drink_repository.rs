use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::drink::{Drink, NewDrink};
use crate::domain::repositories::{DrinkRepository, RepositoryError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Drink>,
    last_id: i32,
}

/// In-process implementation of DrinkRepository
///
/// Ids are assigned from a counter starting at 1 and never reused, like a
/// serial column. Iteration order of the map gives ascending ids.
#[derive(Debug, Default)]
pub struct InMemoryDrinkRepository {
    table: RwLock<Table>,
}

impl InMemoryDrinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrinkRepository for InMemoryDrinkRepository {
    async fn list_all(&self) -> Result<Vec<Drink>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Drink>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, RepositoryError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let drink = drink.into_drink(table.last_id);
        table.rows.insert(drink.id(), drink.clone());
        Ok(drink)
    }

    async fn update(&self, drink: &Drink) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&drink.id()) {
            Some(row) => {
                *row = drink.clone();
                Ok(())
            }
            None => Err(RepositoryError::Missing(drink.id())),
        }
    }

    async fn delete(&self, drink: &Drink) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&drink.id())
            .map(|_| ())
            .ok_or(RepositoryError::Missing(drink.id()))
    }
}
