//! Error types for recipe construction and cloning
//!
//! Every failure is a caller error detected synchronously:
//! - Missing or empty required fields
//! - Clone overrides naming fields a recipe does not have
//! - Variant generation with a non-positive count
//! - Sub-recipe trees in which a recipe would contain itself

use crate::identity::RecipeId;

/// Broad classification of a [`RecipeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed an argument the operation cannot accept
    InvalidArgument,
    /// The requested recipe tree would not be a tree
    StructuralViolation,
}

/// Main recipe error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    /// A required text field was empty
    #[error("invalid argument: `{field}` must not be empty")]
    EmptyField {
        /// Name of the offending field
        field: &'static str,
    },

    /// An override referenced a field that recipes do not have
    #[error("invalid argument: recipes have no overridable field `{field}`")]
    UnknownField {
        /// Field name as supplied by the caller
        field: String,
    },

    /// An override value could not be interpreted
    #[error("invalid argument: malformed override: {0}")]
    MalformedPatch(String),

    /// Variant generation needs at least one recipe
    #[error("invalid argument: variant count must be at least 1, got {count}")]
    InvalidVariantCount {
        /// Requested count
        count: usize,
    },

    /// A recipe would appear as its own descendant
    #[error("structural violation: recipe {id} would contain itself")]
    CycleDetected {
        /// Identity that appears twice on one path
        id: RecipeId,
    },
}

impl RecipeError {
    /// Classify the error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyField { .. }
            | Self::UnknownField { .. }
            | Self::MalformedPatch(_)
            | Self::InvalidVariantCount { .. } => ErrorKind::InvalidArgument,
            Self::CycleDetected { .. } => ErrorKind::StructuralViolation,
        }
    }

    /// Check if error is an invalid-argument condition
    #[inline]
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Check if error is a structural violation
    #[inline]
    #[must_use]
    pub fn is_structural_violation(&self) -> bool {
        self.kind() == ErrorKind::StructuralViolation
    }
}

/// Result alias used throughout the recipe crates
pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
