//! Clone overrides
//!
//! A [`RecipePatch`] names exactly which top-level fields of a cloned recipe
//! are replaced. Only `name`, `ingredients` and `instructions` can be
//! overridden; anything else is rejected when the patch is built.

use crate::error::{RecipeError, Result};
use crate::recipe::{Ingredient, Recipe};
use serde::Deserialize;
use std::str::FromStr;

/// Overridable recipe field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchField {
    /// Recipe title
    Name,
    /// Full ingredient list
    Ingredients,
    /// Instructions text
    Instructions,
}

impl PatchField {
    /// All overridable fields
    pub const ALL: [PatchField; 3] = [Self::Name, Self::Ingredients, Self::Instructions];

    /// Field name as used in override maps
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
        }
    }
}

impl FromStr for PatchField {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "ingredients" => Ok(Self::Ingredients),
            "instructions" => Ok(Self::Instructions),
            other => Err(RecipeError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field replacements applied to the top level of a clone
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipePatch {
    /// Replacement title
    pub name: Option<String>,
    /// Replacement ingredient list
    pub ingredients: Option<Vec<Ingredient>>,
    /// Replacement instructions
    pub instructions: Option<String>,
}

impl RecipePatch {
    /// Empty patch (clone verbatim)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With replacement name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With replacement ingredients
    #[must_use]
    pub fn with_ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ingredient>,
    {
        self.ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    /// With replacement instructions
    #[inline]
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set a text field by name
    ///
    /// # Errors
    /// - [`RecipeError::UnknownField`] if `field` is not overridable
    /// - [`RecipeError::MalformedPatch`] if `field` is `ingredients`, which
    ///   is not a text field
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<&mut Self> {
        match field.parse::<PatchField>()? {
            PatchField::Name => self.name = Some(value.into()),
            PatchField::Instructions => self.instructions = Some(value.into()),
            PatchField::Ingredients => {
                return Err(RecipeError::MalformedPatch(
                    "`ingredients` takes a list, use `with_ingredients`".to_string(),
                ))
            }
        }
        Ok(self)
    }

    /// Parse patch from a JSON object
    ///
    /// ```rust
    /// use larder_recipe::RecipePatch;
    ///
    /// let patch = RecipePatch::from_json(&serde_json::json!({
    ///     "name": "Pink Lemonade",
    ///     "ingredients": [["water", "2 cups"], ["raspberry", "5"]],
    /// }))
    /// .unwrap();
    /// assert_eq!(patch.name.as_deref(), Some("Pink Lemonade"));
    /// ```
    ///
    /// # Errors
    /// - [`RecipeError::UnknownField`] for keys that are not overridable
    /// - [`RecipeError::MalformedPatch`] if `value` is not an object or a
    ///   value has the wrong shape
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| RecipeError::MalformedPatch("expected a JSON object".to_string()))?;

        for key in object.keys() {
            key.parse::<PatchField>()?;
        }

        Self::deserialize(value).map_err(|e| RecipeError::MalformedPatch(e.to_string()))
    }

    /// Check if patch overrides nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Fields this patch overrides
    #[must_use]
    pub fn fields(&self) -> Vec<PatchField> {
        PatchField::ALL
            .into_iter()
            .filter(|field| match field {
                PatchField::Name => self.name.is_some(),
                PatchField::Ingredients => self.ingredients.is_some(),
                PatchField::Instructions => self.instructions.is_some(),
            })
            .collect()
    }

    /// Check the replacement values
    ///
    /// # Errors
    /// Returns [`RecipeError::EmptyField`] if the replacement name is blank.
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(RecipeError::EmptyField { field: "name" }),
            _ => Ok(()),
        }
    }

    /// Apply to the top level of `recipe`; sub-recipes are untouched
    pub(crate) fn apply(&self, recipe: &mut Recipe) {
        if let Some(name) = &self.name {
            recipe.set_name(name.clone());
        }
        if let Some(ingredients) = &self.ingredients {
            recipe.set_ingredients(ingredients.clone());
        }
        if let Some(instructions) = &self.instructions {
            recipe.set_instructions(instructions.clone());
        }
    }
}
