//! Variant templates
//!
//! A [`VariantTemplate`] carries the arguments for the base recipe minted by
//! [`RecipeCollection::generate_variants`](crate::RecipeCollection::generate_variants).

use larder_recipe::{Ingredient, Recipe, RecipeFactory, RecipePatch, Result};

/// Shape of the base recipe for variant generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTemplate {
    /// Category tag
    pub category: String,
    /// Recipe title
    pub name: String,
    /// Ingredients in order
    pub ingredients: Vec<Ingredient>,
    /// Instructions text
    pub instructions: String,
    /// Sub-recipes moved into the base recipe
    pub subrecipes: Vec<Recipe>,
}

impl VariantTemplate {
    /// Create template with no ingredients or sub-recipes
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            ingredients: Vec::new(),
            instructions: instructions.into(),
            subrecipes: Vec::new(),
        }
    }

    /// With ingredients
    #[must_use]
    pub fn with_ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ingredient>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// With sub-recipes
    #[inline]
    #[must_use]
    pub fn with_subrecipes(mut self, subrecipes: Vec<Recipe>) -> Self {
        self.subrecipes = subrecipes;
        self
    }

    /// Replace the fields named by `patch`
    pub(crate) fn patched(mut self, patch: &RecipePatch) -> Self {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(ingredients) = &patch.ingredients {
            self.ingredients.clone_from(ingredients);
        }
        if let Some(instructions) = &patch.instructions {
            self.instructions.clone_from(instructions);
        }
        self
    }

    /// Mint the base recipe
    pub(crate) fn mint(self, factory: &RecipeFactory) -> Result<Recipe> {
        factory.create(
            self.category,
            self.name,
            self.ingredients,
            self.instructions,
            self.subrecipes,
        )
    }
}
