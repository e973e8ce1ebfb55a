use serde::Serialize;

use super::value_objects::{Ingredient, Recipe, ShortIngredient};

/// Validated input for a drink that has not been stored yet
///
/// The store assigns the id on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    title: String,
    recipe: Recipe,
}

impl NewDrink {
    /// Creates a new drink draft
    ///
    /// # Returns
    /// * `Ok(NewDrink)` - The draft, ready to insert
    /// * `Err(String)` - If the title is empty
    pub fn new(title: String, recipe: Recipe) -> Result<Self, String> {
        validate_title(&title)?;
        Ok(Self { title, recipe })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Attaches the store-assigned id
    pub fn into_drink(self, id: i32) -> Drink {
        Drink {
            id,
            title: self.title,
            recipe: self.recipe,
        }
    }
}

/// Drink entity
///
/// # Invariants
/// - `id` is assigned by the store and never changes
/// - `title` is never empty
///
/// # Example
/// ```
/// use drinks_api::domain::drink::{Drink, Ingredient, Recipe};
///
/// let recipe = Recipe::new(vec![Ingredient::new("water", "blue", 1)]);
/// let drink = Drink::from_persistence(1, "Water".to_string(), recipe);
///
/// assert_eq!(drink.short().recipe[0].color, "blue");
/// assert_eq!(drink.long().recipe[0].name, "water");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    id: i32,
    title: String,
    recipe: Recipe,
}

/// Public projection of a drink, ingredient names omitted
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full projection of a drink
#[derive(Debug, Clone, Serialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// Reconstitutes a drink from a stored row
    pub fn from_persistence(id: i32, title: String, recipe: Recipe) -> Self {
        Self { id, title, recipe }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Renames the drink
    ///
    /// # Returns
    /// * `Err(String)` - If the new title is empty; the drink is left unchanged
    pub fn rename(&mut self, title: String) -> Result<(), String> {
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    /// Replaces the recipe
    pub fn set_recipe(&mut self, recipe: Recipe) {
        self.recipe = recipe;
    }

    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.short(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.ingredients().to_vec(),
        }
    }
}

fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    Ok(())
}
