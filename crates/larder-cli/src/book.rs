//! Recipe book configuration
//!
//! A recipe book lists the recipe trees the driver builds, one producer
//! thread per top-level entry:
//!
//! ```toml
//! [[recipes]]
//! category = "Beverage"
//! name = "Lemonade"
//! ingredients = [["water", "2 cups"], ["lemon", "1 whole"]]
//! instructions = "Mix ingredients and serve cold."
//!
//! [[recipes.subrecipes]]
//! category = "Beverage"
//! name = "Syrup"
//! ingredients = [["sugar", "2 tbsp"]]
//! ```

use larder_collection::VariantTemplate;
use larder_recipe::{Recipe, RecipeError, RecipeFactory};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recipe book loading errors
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// File could not be read
    #[error("failed to read recipe book: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a valid recipe book
    #[error("invalid recipe book: {0}")]
    Parse(#[from] toml::de::Error),

    /// Book could not be rendered as TOML
    #[error("failed to serialize recipe book: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Book lists no recipes
    #[error("recipe book has no recipes")]
    Empty,
}

/// Declarative description of one recipe tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSpec {
    /// Category tag
    pub category: String,
    /// Recipe title
    pub name: String,
    /// `(name, quantity)` pairs in order
    #[serde(default)]
    pub ingredients: Vec<(String, String)>,
    /// Instructions text
    #[serde(default)]
    pub instructions: String,
    /// Nested recipes, built before their parent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subrecipes: Vec<RecipeSpec>,
}

impl RecipeSpec {
    /// Create leaf spec
    #[must_use]
    pub fn new(
        category: &str,
        name: &str,
        ingredients: &[(&str, &str)],
        instructions: &str,
    ) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            ingredients: ingredients
                .iter()
                .map(|&(n, q)| (n.to_string(), q.to_string()))
                .collect(),
            instructions: instructions.to_string(),
            subrecipes: Vec::new(),
        }
    }

    /// With nested recipes
    #[must_use]
    pub fn with_subrecipes(mut self, subrecipes: Vec<RecipeSpec>) -> Self {
        self.subrecipes = subrecipes;
        self
    }

    /// Build the tree bottom-up through `factory`
    ///
    /// # Errors
    /// Propagates the first [`RecipeError`] raised while minting.
    pub fn build(&self, factory: &RecipeFactory) -> Result<Recipe, RecipeError> {
        let subrecipes = self.build_subrecipes(factory)?;
        factory.create(
            self.category.as_str(),
            self.name.as_str(),
            self.ingredients.iter().cloned(),
            self.instructions.as_str(),
            subrecipes,
        )
    }

    /// Variant template for this spec, with its sub-recipes already built
    ///
    /// # Errors
    /// Propagates the first [`RecipeError`] raised while minting children.
    pub fn to_template(&self, factory: &RecipeFactory) -> Result<VariantTemplate, RecipeError> {
        Ok(
            VariantTemplate::new(&self.category, &self.name, &self.instructions)
                .with_ingredients(self.ingredients.iter().cloned())
                .with_subrecipes(self.build_subrecipes(factory)?),
        )
    }

    fn build_subrecipes(&self, factory: &RecipeFactory) -> Result<Vec<Recipe>, RecipeError> {
        self.subrecipes.iter().map(|s| s.build(factory)).collect()
    }
}

/// Collection of top-level recipe specs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeBook {
    /// Top-level recipes, one producer each
    #[serde(default)]
    pub recipes: Vec<RecipeSpec>,
}

impl RecipeBook {
    /// Built-in book: a layered cake and a lemonade
    #[must_use]
    pub fn builtin() -> Self {
        let frosting = RecipeSpec::new(
            "Dessert",
            "Frosting",
            &[("sugar", "1 cup"), ("butter", "1/2 cup"), ("vanilla", "1 tsp")],
            "Mix all ingredients until smooth.",
        );
        let cake_base = RecipeSpec::new(
            "Dessert",
            "Cake Base",
            &[("flour", "2 cups"), ("sugar", "1 cup"), ("eggs", "3")],
            "Mix ingredients and bake at 350°F for 30 minutes.",
        );
        let cake = RecipeSpec::new(
            "Dessert",
            "Layer Cake",
            &[("milk", "1 cup"), ("baking powder", "1 tbsp")],
            "Prepare the layers and frost each layer.",
        )
        .with_subrecipes(vec![frosting, cake_base]);
        let lemonade = RecipeSpec::new(
            "Beverage",
            "Lemonade",
            &[("water", "2 cups"), ("lemon", "1 whole"), ("sugar", "2 tbsp")],
            "Mix ingredients and serve cold.",
        );

        Self {
            recipes: vec![cake, lemonade],
        }
    }

    /// Parse book from TOML text
    ///
    /// # Errors
    /// - [`BookError::Parse`] on malformed TOML
    /// - [`BookError::Empty`] if no recipes are listed
    pub fn parse(text: &str) -> Result<Self, BookError> {
        let book: Self = toml::from_str(text)?;
        if book.recipes.is_empty() {
            return Err(BookError::Empty);
        }
        Ok(book)
    }

    /// Load book from a TOML file
    ///
    /// # Errors
    /// Returns [`BookError::Io`] if the file cannot be read, otherwise as
    /// [`parse`](Self::parse).
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path)?;
        let book = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), recipes = book.recipes.len(), "loaded recipe book");
        Ok(book)
    }

    /// Render book as TOML
    ///
    /// # Errors
    /// Returns [`BookError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, BookError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self::builtin()
    }
}
