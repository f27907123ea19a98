//! Recipe factory
//!
//! Provides [`RecipeFactory`] for minting recipes under open category tags and
//! for identity-fresh deep clones. Categories need no registration: the first
//! recipe created under a tag starts that category.

use crate::error::{RecipeError, Result};
use crate::identity::IdentityAllocator;
use crate::patch::RecipePatch;
use crate::recipe::{Category, Ingredient, Recipe};
use dashmap::DashMap;
use std::sync::Arc;

/// Factory for recipes and recipe clones
///
/// The factory is `Sync`; share it behind an `Arc` between producer threads.
#[derive(Debug)]
pub struct RecipeFactory {
    allocator: Arc<IdentityAllocator>,
    minted: DashMap<Category, usize>,
}

impl RecipeFactory {
    /// Create factory drawing ids from `allocator`
    #[inline]
    #[must_use]
    pub fn new(allocator: Arc<IdentityAllocator>) -> Self {
        Self {
            allocator,
            minted: DashMap::new(),
        }
    }

    /// The shared identity allocator
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &Arc<IdentityAllocator> {
        &self.allocator
    }

    /// Create a recipe
    ///
    /// Ingredients keep the order given. `subrecipes` are moved into the new
    /// recipe, which owns them from then on.
    ///
    /// # Errors
    /// - [`RecipeError::EmptyField`] if `category` or `name` is blank
    /// - [`RecipeError::CycleDetected`] if any sub-recipe tree would contain a
    ///   recipe as its own descendant
    pub fn create<I, T>(
        &self,
        category: impl Into<String>,
        name: impl Into<String>,
        ingredients: I,
        instructions: impl Into<String>,
        subrecipes: Vec<Recipe>,
    ) -> Result<Recipe>
    where
        I: IntoIterator<Item = T>,
        T: Into<Ingredient>,
    {
        let category = Category::new(category)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RecipeError::EmptyField { field: "name" });
        }

        for child in &subrecipes {
            if let Err(e) = child.validate_tree() {
                tracing::warn!(%category, %name, error = %e, "rejected recipe construction");
                return Err(e);
            }
        }

        let id = self.allocator.next_id();
        if let Some(child) = subrecipes.iter().find(|c| c.contains_id(id)) {
            tracing::warn!(%id, child = %child.id(), "sub-recipe already carries the new id");
            return Err(RecipeError::CycleDetected { id });
        }

        let ingredients = ingredients.into_iter().map(Into::into).collect();
        let recipe = Recipe::assemble(
            id,
            category,
            name,
            ingredients,
            instructions.into(),
            subrecipes,
        );

        self.record(recipe.category());
        tracing::debug!(
            %id,
            category = %recipe.category(),
            name = recipe.name(),
            subrecipes = recipe.subrecipes().len(),
            "minted recipe"
        );
        Ok(recipe)
    }

    /// Deep-clone `recipe` under a fresh identity
    ///
    /// The whole sub-recipe tree is copied; nothing is shared with the source.
    /// `overrides` replace fields on the top-level clone only. Sub-recipes
    /// are copied verbatim.
    ///
    /// # Errors
    /// - [`RecipeError::EmptyField`] if `overrides` would blank the name
    /// - [`RecipeError::CycleDetected`] if `recipe` is not a tree
    pub fn clone_recipe(&self, recipe: &Recipe, overrides: &RecipePatch) -> Result<Recipe> {
        overrides.validate()?;
        recipe.validate_tree()?;

        let id = self.allocator.next_id();
        let mut clone = recipe.copy_with_id(id);
        overrides.apply(&mut clone);

        self.record(clone.category());
        tracing::debug!(
            %id,
            source = %recipe.id(),
            overridden = ?overrides.fields(),
            "cloned recipe"
        );
        Ok(clone)
    }

    fn record(&self, category: &Category) {
        *self.minted.entry(category.clone()).or_insert(0) += 1;
    }

    /// Number of recipes minted or cloned under `category`
    #[must_use]
    pub fn minted(&self, category: &str) -> usize {
        self.minted.get(category).map_or(0, |count| *count)
    }

    /// Categories seen so far with their mint counts, sorted by tag
    #[must_use]
    pub fn categories(&self) -> Vec<(Category, usize)> {
        let mut seen: Vec<_> = self
            .minted
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        seen.sort();
        seen
    }
}

impl Default for RecipeFactory {
    fn default() -> Self {
        Self::new(Arc::new(IdentityAllocator::new()))
    }
}
