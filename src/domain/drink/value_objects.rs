use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single ingredient of a drink recipe
///
/// `parts` is the relative amount of the ingredient in the glass. It is kept
/// exactly as the client sent it (integer, fraction or text). Fields other
/// than `name`, `color` and `parts` are carried in `extra` and stored with
/// the ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, color: impl Into<String>, parts: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            parts: parts.into(),
            extra: Map::new(),
        }
    }
}

/// Ingredient with its name withheld, as shown to anonymous callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: Value,
}

impl From<&Ingredient> for ShortIngredient {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            color: ingredient.color.clone(),
            parts: ingredient.parts.clone(),
        }
    }
}

/// Ordered list of ingredients making up a drink
///
/// # Accepted input shapes
/// ```text
/// [{"name": .., "color": .., "parts": ..}, ...]   list of ingredients
/// {"name": .., "color": .., "parts": ..}          single ingredient
/// ```
/// A single ingredient is normalised to a one-element list.
///
/// # Example
/// ```
/// use drinks_api::domain::drink::Recipe;
/// use serde_json::json;
///
/// let recipe = Recipe::from_json(json!({"name": "water", "color": "blue", "parts": 1}))
///     .expect("valid recipe");
/// assert_eq!(recipe.ingredients().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(Vec<Ingredient>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl Recipe {
    /// Creates a recipe from a list of ingredients
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        Self(ingredients)
    }

    /// Parses a recipe from a request body value
    ///
    /// # Returns
    /// * `Ok(Recipe)` - The parsed recipe
    /// * `Err(String)` - If the value is neither an ingredient nor a list of them
    pub fn from_json(value: Value) -> Result<Self, String> {
        match serde_json::from_value::<RecipeInput>(value) {
            Ok(RecipeInput::Many(ingredients)) => Ok(Self(ingredients)),
            Ok(RecipeInput::One(ingredient)) => Ok(Self(vec![ingredient])),
            Err(_) => Err(
                "Recipe must be an ingredient or a list of ingredients with name, color and parts"
                    .to_string(),
            ),
        }
    }

    /// Parses a recipe from its stored text form
    pub fn from_stored(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serializes the recipe into its stored text form
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.0
    }

    /// Recipe projection without ingredient names
    pub fn short(&self) -> Vec<ShortIngredient> {
        self.0.iter().map(ShortIngredient::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn water() -> Ingredient {
        Ingredient::new("water", "blue", 1)
    }

    #[test]
    fn list_input_is_parsed_in_order() {
        let recipe = Recipe::from_json(json!([
            {"name": "espresso", "color": "brown", "parts": 1},
            {"name": "milk", "color": "white", "parts": 3}
        ]))
        .expect("valid recipe");

        let names: Vec<&str> = recipe.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["espresso", "milk"]);
    }

    #[test]
    fn single_ingredient_is_wrapped() {
        let recipe = Recipe::from_json(json!({"name": "water", "color": "blue", "parts": 1}))
            .expect("valid recipe");
        assert_eq!(recipe.ingredients(), &[water()]);
    }

    #[test]
    fn missing_ingredient_field_is_rejected() {
        assert!(Recipe::from_json(json!([{"color": "blue", "parts": 1}])).is_err());
    }

    #[test]
    fn parts_are_kept_as_sent() {
        let recipe = Recipe::from_json(json!([
            {"name": "milk", "color": "white", "parts": 0.5},
            {"name": "sugar", "color": "white", "parts": "2"}
        ]))
        .expect("valid recipe");

        assert_eq!(recipe.ingredients()[0].parts, json!(0.5));
        assert_eq!(recipe.ingredients()[1].parts, json!("2"));
        assert_eq!(
            recipe.to_stored().unwrap(),
            r#"[{"name":"milk","color":"white","parts":0.5},{"name":"sugar","color":"white","parts":"2"}]"#
        );
    }

    #[test]
    fn extra_ingredient_fields_survive_storage() {
        let recipe = Recipe::from_json(json!({
            "name": "espresso", "color": "brown", "parts": 1, "origin": "Colombia"
        }))
        .expect("valid recipe");
        assert_eq!(recipe.ingredients()[0].extra["origin"], "Colombia");

        let stored = recipe.to_stored().unwrap();
        let restored = Recipe::from_stored(&stored).unwrap();
        assert_eq!(restored, recipe);

        // The public view stays fixed to color and parts
        let short = serde_json::to_value(restored.short()).unwrap();
        assert_eq!(short, json!([{"color": "brown", "parts": 1}]));
    }

    #[test]
    fn missing_parts_is_rejected() {
        assert!(Recipe::from_json(json!({"name": "water", "color": "blue"})).is_err());
    }

    #[test]
    fn non_structured_recipe_is_rejected() {
        assert!(Recipe::from_json(json!("water")).is_err());
        assert!(Recipe::from_json(json!(42)).is_err());
    }

    #[test]
    fn short_projection_drops_names() {
        let recipe = Recipe::new(vec![water()]);
        let short = serde_json::to_value(recipe.short()).unwrap();
        assert_eq!(short, json!([{"color": "blue", "parts": 1}]));
    }

    #[test]
    fn stored_text_is_a_plain_json_list() {
        let recipe = Recipe::new(vec![water()]);
        let stored = recipe.to_stored().unwrap();
        assert_eq!(stored, r#"[{"name":"water","color":"blue","parts":1}]"#);
        assert_eq!(Recipe::from_stored(&stored).unwrap(), recipe);
    }
}
