//! Recipe entity model
//!
//! A [`Recipe`] is a tagged value object: its [`Category`] classifies it but
//! never changes its shape. Recipes own their sub-recipes, forming a tree.

use crate::error::{RecipeError, Result};
use crate::identity::RecipeId;
use serde::{Deserialize, Serialize};

/// Indentation added per nesting level when rendering
pub const RENDER_INDENT: usize = 4;

/// Free-form recipe category tag (e.g. `Dessert`, `Beverage`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create category tag
    ///
    /// # Errors
    /// Returns [`RecipeError::EmptyField`] if `tag` is empty or whitespace.
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(RecipeError::EmptyField { field: "category" });
        }
        Ok(Self(tag))
    }

    /// Tag text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One ingredient line: a name and a free-text quantity
///
/// Deserializes from either `{ "name": .., "quantity": .. }` or a
/// `[name, quantity]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "IngredientRepr")]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Quantity as written (no unit normalization)
    pub quantity: String,
}

impl Ingredient {
    /// Create ingredient
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientRepr {
    Pair(String, String),
    Full { name: String, quantity: String },
}

impl From<IngredientRepr> for Ingredient {
    fn from(repr: IngredientRepr) -> Self {
        match repr {
            IngredientRepr::Pair(name, quantity) | IngredientRepr::Full { name, quantity } => {
                Self { name, quantity }
            }
        }
    }
}

impl<N: Into<String>, Q: Into<String>> From<(N, Q)> for Ingredient {
    fn from((name, quantity): (N, Q)) -> Self {
        Self::new(name, quantity)
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.quantity)
    }
}

/// A named unit of ingredients and instructions, optionally composed of
/// nested sub-recipes
///
/// Recipes are minted by [`RecipeFactory`](crate::RecipeFactory). `Clone`
/// is a plain structural copy that keeps every id; use
/// [`RecipeFactory::clone_recipe`](crate::RecipeFactory::clone_recipe) to
/// obtain a copy with a fresh identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    category: Category,
    name: String,
    ingredients: Vec<Ingredient>,
    instructions: String,
    #[serde(default)]
    subrecipes: Vec<Recipe>,
}

impl Recipe {
    pub(crate) fn assemble(
        id: RecipeId,
        category: Category,
        name: String,
        ingredients: Vec<Ingredient>,
        instructions: String,
        subrecipes: Vec<Recipe>,
    ) -> Self {
        Self {
            id,
            category,
            name,
            ingredients,
            instructions,
            subrecipes,
        }
    }

    /// Recipe identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Category tag
    #[inline]
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Human-readable title
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ingredients in construction order
    #[inline]
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Mutable access to the ingredient list
    #[inline]
    pub fn ingredients_mut(&mut self) -> &mut Vec<Ingredient> {
        &mut self.ingredients
    }

    /// Instructions text
    #[inline]
    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Direct sub-recipes in order
    #[inline]
    #[must_use]
    pub fn subrecipes(&self) -> &[Recipe] {
        &self.subrecipes
    }

    /// Mutable ingredient list of the descendant at `path`
    ///
    /// `path` holds child indices from this recipe down; an empty path names
    /// this recipe. Returns `None` if any index is out of range. Sub-recipes
    /// themselves can only be added through [`attach`](Self::attach).
    pub fn subrecipe_ingredients_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Ingredient>> {
        let mut node = self;
        for &index in path {
            node = node.subrecipes.get_mut(index)?;
        }
        Some(&mut node.ingredients)
    }

    /// Append `child` as the last sub-recipe
    ///
    /// # Errors
    /// Returns [`RecipeError::CycleDetected`] if `child` (or anything below it)
    /// carries this recipe's id, or if `child` is not itself a tree.
    pub fn attach(&mut self, child: Recipe) -> Result<()> {
        let mut path = vec![self.id];
        if let Some(id) = child.repeated_on_path(&mut path) {
            tracing::warn!(parent = %self.id, child = %child.id, "rejected cyclic sub-recipe");
            return Err(RecipeError::CycleDetected { id });
        }
        self.subrecipes.push(child);
        Ok(())
    }

    /// Check the tree shape
    ///
    /// # Errors
    /// Returns [`RecipeError::CycleDetected`] naming the first id that occurs
    /// twice on one root-to-leaf path.
    pub fn validate_tree(&self) -> Result<()> {
        match self.repeated_on_path(&mut Vec::new()) {
            Some(id) => Err(RecipeError::CycleDetected { id }),
            None => Ok(()),
        }
    }

    fn repeated_on_path(&self, path: &mut Vec<RecipeId>) -> Option<RecipeId> {
        if path.contains(&self.id) {
            return Some(self.id);
        }
        path.push(self.id);
        let found = self
            .subrecipes
            .iter()
            .find_map(|child| child.repeated_on_path(path));
        path.pop();
        found
    }

    /// Whether `id` names this recipe or any descendant
    #[must_use]
    pub fn contains_id(&self, id: RecipeId) -> bool {
        self.id == id || self.subrecipes.iter().any(|c| c.contains_id(id))
    }

    /// Number of recipes in this tree, including the root
    #[must_use]
    pub fn tree_size(&self) -> usize {
        1 + self.subrecipes.iter().map(Recipe::tree_size).sum::<usize>()
    }

    /// Depth of this tree (a leaf has depth 1)
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.subrecipes.iter().map(Recipe::depth).max().unwrap_or(0)
    }

    /// Explicit recursive copy with the top-level id replaced
    pub(crate) fn copy_with_id(&self, id: RecipeId) -> Self {
        Self {
            id,
            category: self.category.clone(),
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            subrecipes: self.subrecipes.iter().map(Recipe::deep_copy).collect(),
        }
    }

    fn deep_copy(&self) -> Self {
        self.copy_with_id(self.id)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_ingredients(&mut self, ingredients: Vec<Ingredient>) {
        self.ingredients = ingredients;
    }

    pub(crate) fn set_instructions(&mut self, instructions: String) {
        self.instructions = instructions;
    }

    /// Render this recipe and its sub-recipes at indent `indent`
    ///
    /// ```text
    /// ID: 3, Layer Cake
    /// Ingredients: milk (1 cup), baking powder (1 tbsp)
    /// Instructions: Prepare the layers and frost each layer.
    ///     ID: 1, Frosting
    ///     ...
    /// ```
    ///
    /// No trailing newline is written.
    #[must_use]
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        self.render_into(indent, &mut out);
        out
    }

    /// Append the rendering of this recipe to `out`
    pub fn render_into(&self, indent: usize, out: &mut String) {
        let pad = " ".repeat(indent);
        let ingredients = self
            .ingredients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        out.push_str(&format!(
            "{pad}ID: {}, {}\n{pad}Ingredients: {ingredients}\n{pad}Instructions: {}",
            self.id, self.name, self.instructions
        ));

        for child in &self.subrecipes {
            out.push('\n');
            child.render_into(indent + RENDER_INDENT, out);
        }
    }
}

impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(0))
    }
}
