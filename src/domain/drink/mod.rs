// Drink domain module
// Contains the drink entity, its projections and recipe value objects

#![allow(clippy::module_inception)]

pub mod drink;
pub mod value_objects;

// Re-export main types for convenience
pub use drink::{Drink, DrinkLong, DrinkShort, NewDrink};
pub use value_objects::{Ingredient, Recipe, ShortIngredient};
