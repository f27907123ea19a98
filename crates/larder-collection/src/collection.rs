//! Shared recipe collection
//!
//! Provides [`RecipeCollection`], an append-only ordered collection guarded by
//! a single mutex. Appends, snapshots and renders each run entirely under the
//! lock, so a reader never observes a half-added recipe.

use crate::observer::{CollectionObserver, TracingObserver};
use crate::variants::VariantTemplate;
use larder_recipe::{Recipe, RecipeError, RecipeFactory, RecipeId, RecipePatch, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe ordered collection of recipes
///
/// Insertion order is the order in which callers acquired the lock.
#[derive(Debug)]
pub struct RecipeCollection {
    recipes: Mutex<Vec<Recipe>>,
    observer: Arc<dyn CollectionObserver>,
}

impl RecipeCollection {
    /// Create empty collection logging adds through `tracing`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    /// Create empty collection notifying `observer` on each add
    #[inline]
    #[must_use]
    pub fn with_observer(observer: Arc<dyn CollectionObserver>) -> Self {
        Self {
            recipes: Mutex::new(Vec::new()),
            observer,
        }
    }

    /// Append `recipe` and notify the observer
    ///
    /// The collection owns the recipe from here on. Returns its id.
    pub fn add(&self, recipe: Recipe) -> RecipeId {
        let id = recipe.id();
        let mut recipes = self.recipes.lock();
        recipes.push(recipe);
        let position = recipes.len() - 1;
        self.observer.recipe_added(&recipes[position], position);
        id
    }

    /// Create a base recipe and `count - 1` clones of it, adding all of them
    ///
    /// `overrides` shape the base; every clone is a verbatim deep copy of the
    /// base with a fresh identity. Returns the added ids in insertion order.
    ///
    /// # Errors
    /// - [`RecipeError::InvalidVariantCount`] if `count` is zero
    /// - any error from [`RecipeFactory::create`] or an invalid `overrides`
    ///
    /// Arguments are checked before anything is minted or added.
    pub fn generate_variants(
        &self,
        template: VariantTemplate,
        overrides: &RecipePatch,
        count: usize,
        factory: &RecipeFactory,
    ) -> Result<Vec<RecipeId>> {
        if count == 0 {
            return Err(RecipeError::InvalidVariantCount { count });
        }
        overrides.validate()?;

        let base = template.patched(overrides).mint(factory)?;
        let verbatim = RecipePatch::new();
        let variants = (1..count)
            .map(|_| factory.clone_recipe(&base, &verbatim))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(base = %base.id(), count, "generating recipe variants");

        let mut ids = Vec::with_capacity(count);
        ids.push(self.add(base));
        ids.extend(variants.into_iter().map(|variant| self.add(variant)));
        Ok(ids)
    }

    /// Cloned copy of every recipe, in insertion order
    #[must_use]
    pub fn snapshot(&self) -> Vec<Recipe> {
        self.recipes.lock().clone()
    }

    /// Render every recipe in insertion order
    ///
    /// Each recipe uses [`Recipe::render`] at indent 0; recipes are separated
    /// by a newline. An empty collection renders as an empty string.
    #[must_use]
    pub fn snapshot_and_render(&self) -> String {
        let recipes = self.recipes.lock();
        let mut out = String::new();
        for (i, recipe) in recipes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            recipe.render_into(0, &mut out);
        }
        out
    }

    /// Ids of the top-level recipes, in insertion order
    #[must_use]
    pub fn ids(&self) -> Vec<RecipeId> {
        self.recipes.lock().iter().map(Recipe::id).collect()
    }

    /// Look up a top-level recipe by id
    #[must_use]
    pub fn get(&self, id: RecipeId) -> Option<Recipe> {
        self.recipes.lock().iter().find(|r| r.id() == id).cloned()
    }

    /// Number of top-level recipes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.lock().len()
    }

    /// Check if collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RecipeCollection {
    fn default() -> Self {
        Self::new()
    }
}
