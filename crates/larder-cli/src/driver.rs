//! Concurrent producer driver
//!
//! Runs one producer thread per top-level recipe in a [`RecipeBook`], each
//! building its tree through the shared factory and handing it to the shared
//! collection. All producers are joined before [`run_book`] returns.

use crate::book::RecipeBook;
use larder_collection::RecipeCollection;
use larder_recipe::{RecipeError, RecipeFactory, RecipeId, RecipePatch};
use std::sync::Arc;

/// Driver errors
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A producer failed to build its recipe
    #[error("producer for `{recipe}` failed: {source}")]
    Producer {
        /// Name of the top-level recipe
        recipe: String,
        /// Underlying error
        #[source]
        source: RecipeError,
    },

    /// A producer thread could not be started
    #[error("failed to spawn producer thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A producer thread panicked
    #[error("producer for `{0}` panicked")]
    Panicked(String),

    /// Variant generation failed
    #[error("variant generation failed: {0}")]
    Variants(#[source] RecipeError),
}

/// What a run added to the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ids added by producers, in book order (not insertion order)
    pub produced: Vec<RecipeId>,
    /// Ids added by variant generation, in insertion order
    pub variants: Vec<RecipeId>,
}

/// Options for a driver run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Generate this many variants of the first book entry after producers finish
    pub variants: Option<usize>,
    /// Overrides applied to the variant base before it is cloned
    pub variant_overrides: RecipePatch,
}

/// Build every book entry on its own thread, then generate variants
///
/// # Errors
/// Returns the first producer failure in book order. Producers that succeed
/// still add their recipes; nothing is rolled back.
pub fn run_book(
    book: &RecipeBook,
    factory: &Arc<RecipeFactory>,
    collection: &Arc<RecipeCollection>,
    options: &RunOptions,
) -> Result<RunSummary, DriverError> {
    let outcomes = std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(book.recipes.len());
        for (i, spec) in book.recipes.iter().enumerate() {
            let factory = Arc::clone(factory);
            let collection = Arc::clone(collection);
            let handle = std::thread::Builder::new()
                .name(format!("producer-{i}"))
                .spawn_scoped(scope, move || {
                    tracing::info!(recipe = %spec.name, "starting producer");
                    let recipe = spec.build(&factory)?;
                    let id = collection.add(recipe);
                    tracing::info!(recipe = %spec.name, %id, "finished producer");
                    Ok::<_, RecipeError>(id)
                })?;
            handles.push((spec.name.clone(), handle));
        }

        Ok::<_, DriverError>(
            handles
                .into_iter()
                .map(|(name, handle)| (name, handle.join()))
                .collect::<Vec<_>>(),
        )
    })?;

    let mut summary = RunSummary::default();
    for (recipe, outcome) in outcomes {
        match outcome {
            Ok(Ok(id)) => summary.produced.push(id),
            Ok(Err(source)) => return Err(DriverError::Producer { recipe, source }),
            Err(_) => return Err(DriverError::Panicked(recipe)),
        }
    }

    if let (Some(count), Some(first)) = (options.variants, book.recipes.first()) {
        let template = first.to_template(factory).map_err(DriverError::Variants)?;
        summary.variants = collection
            .generate_variants(template, &options.variant_overrides, count, factory)
            .map_err(DriverError::Variants)?;
    }

    Ok(summary)
}
