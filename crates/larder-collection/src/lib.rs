//! Larder Collection
//!
//! The shared, mutex-guarded catalog that concurrent producers merge their
//! recipes into.
//!
//! # Core Concepts
//!
//! - [`RecipeCollection`]: append-only ordered collection, safe for any number
//!   of concurrent writers and readers
//! - [`CollectionObserver`]: synchronous notification for every add
//! - [`VariantTemplate`]: base-recipe arguments for variant generation
//!
//! # Example
//!
//! ```rust
//! use larder_collection::RecipeCollection;
//! use larder_recipe::RecipeFactory;
//! use std::sync::Arc;
//!
//! let factory = Arc::new(RecipeFactory::default());
//! let collection = Arc::new(RecipeCollection::new());
//!
//! std::thread::scope(|scope| {
//!     for name in ["Tea", "Coffee"] {
//!         let (factory, collection) = (Arc::clone(&factory), Arc::clone(&collection));
//!         scope.spawn(move || {
//!             let recipe = factory
//!                 .create("Beverage", name, [("water", "1 cup")], "Brew.", vec![])
//!                 .unwrap();
//!             collection.add(recipe);
//!         });
//!     }
//! });
//!
//! assert_eq!(collection.len(), 2);
//! println!("{}", collection.snapshot_and_render());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod collection;
mod observer;
mod variants;

// Re-exports
pub use collection::RecipeCollection;
pub use observer::{CollectionObserver, NoopObserver, TracingObserver};
pub use variants::VariantTemplate;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
