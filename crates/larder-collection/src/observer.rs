//! Add notifications
//!
//! [`RecipeCollection::add`](crate::RecipeCollection::add) reports every
//! append to a [`CollectionObserver`] while still holding the collection lock,
//! so observers see adds in exactly the order they were applied. Observers
//! must not call back into the collection.

use larder_recipe::Recipe;

/// Hook invoked synchronously for each added recipe
pub trait CollectionObserver: Send + Sync + std::fmt::Debug {
    /// `recipe` was appended at `position` (0-based insertion index)
    fn recipe_added(&self, recipe: &Recipe, position: usize);
}

/// Default observer: one `tracing` event per add
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CollectionObserver for TracingObserver {
    fn recipe_added(&self, recipe: &Recipe, position: usize) {
        tracing::info!(
            id = %recipe.id(),
            category = %recipe.category(),
            name = recipe.name(),
            position,
            "added to recipe collection"
        );
        tracing::debug!("added recipe:\n{recipe}");
    }
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CollectionObserver for NoopObserver {
    fn recipe_added(&self, _recipe: &Recipe, _position: usize) {}
}
