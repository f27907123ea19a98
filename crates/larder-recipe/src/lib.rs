//! Larder Recipe Model
//!
//! Composable recipe entities with concurrent-safe identity assignment.
//!
//! # Core Concepts
//!
//! - [`IdentityAllocator`]: monotonic id source shared by every producer
//! - [`Recipe`]: category-tagged value object owning a tree of sub-recipes
//! - [`RecipeFactory`]: mints recipes and identity-fresh deep clones
//! - [`RecipePatch`]: the fields a clone may override
//!
//! # Example
//!
//! ```rust
//! use larder_recipe::{IdentityAllocator, RecipeFactory, RecipePatch};
//! use std::sync::Arc;
//!
//! let factory = RecipeFactory::new(Arc::new(IdentityAllocator::new()));
//!
//! let frosting = factory
//!     .create("Dessert", "Frosting", [("sugar", "1 cup")], "Mix until smooth.", vec![])
//!     .unwrap();
//! let cake = factory
//!     .create("Dessert", "Layer Cake", [("milk", "1 cup")], "Frost each layer.", vec![frosting])
//!     .unwrap();
//!
//! let party = factory
//!     .clone_recipe(&cake, &RecipePatch::new().with_name("Party Cake"))
//!     .unwrap();
//! assert_ne!(party.id(), cake.id());
//! assert_eq!(party.subrecipes()[0].name(), "Frosting");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod factory;
mod identity;
mod patch;
mod recipe;

// Re-exports
pub use error::{ErrorKind, RecipeError, Result};
pub use factory::RecipeFactory;
pub use identity::{IdentityAllocator, RecipeId};
pub use patch::{PatchField, RecipePatch};
pub use recipe::{Category, Ingredient, Recipe, RENDER_INDENT};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building recipes
    pub use crate::{
        Category, IdentityAllocator, Ingredient, Recipe, RecipeError, RecipeFactory, RecipeId,
        RecipePatch,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
