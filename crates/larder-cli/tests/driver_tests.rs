//! Functional tests for the producer driver.
//!
//! The driver launches one producer per book entry, waits for all of them and
//! only then renders. These tests run it over the built-in book, over books
//! loaded from disk, and over books that must fail.

use larder_cli::{run_book, text_report, DriverError, RecipeBook, RecipeSpec, RunOptions};
use larder_collection::{NoopObserver, RecipeCollection};
use larder_recipe::{RecipeFactory, RecipePatch};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

fn shared() -> (Arc<RecipeFactory>, Arc<RecipeCollection>) {
    (
        Arc::new(RecipeFactory::default()),
        Arc::new(RecipeCollection::with_observer(Arc::new(NoopObserver))),
    )
}

#[test]
fn builtin_book_produces_cake_and_lemonade() {
    let (factory, collection) = shared();
    let summary = run_book(
        &RecipeBook::builtin(),
        &factory,
        &collection,
        &RunOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.produced.len(), 2);
    assert!(summary.variants.is_empty());
    assert_eq!(collection.len(), 2);

    let mut names: Vec<String> = collection
        .snapshot()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, ["Layer Cake", "Lemonade"]);

    let total: usize = collection.snapshot().iter().map(|r| r.tree_size()).sum();
    assert_eq!(total, 4);
    assert_eq!(factory.minted("Dessert"), 3);
    assert_eq!(factory.minted("Beverage"), 1);
}

#[test]
fn report_wraps_rendering_in_heading_and_rule() {
    let (factory, collection) = shared();
    let book = RecipeBook {
        recipes: vec![RecipeSpec::new(
            "Beverage",
            "Lemonade",
            &[("water", "2 cups"), ("lemon", "1 whole"), ("sugar", "2 tbsp")],
            "Mix ingredients and serve cold.",
        )],
    };
    run_book(&book, &factory, &collection, &RunOptions::default()).unwrap();

    assert_eq!(
        text_report(&collection.snapshot_and_render()),
        "Recipe Collection:\n\
         ID: 1, Lemonade\n\
         Ingredients: water (2 cups), lemon (1 whole), sugar (2 tbsp)\n\
         Instructions: Mix ingredients and serve cold.\n\
         ------------------------------\n"
    );
}

#[test]
fn variants_follow_producers() {
    let (factory, collection) = shared();
    let options = RunOptions {
        variants: Some(3),
        variant_overrides: RecipePatch::new().with_name("Layer Cake (copy)"),
    };
    let summary = run_book(&RecipeBook::builtin(), &factory, &collection, &options).unwrap();

    assert_eq!(summary.variants.len(), 3);
    assert_eq!(collection.len(), 2 + 3);
    assert_eq!(&collection.ids()[2..], summary.variants.as_slice());

    let variants = &collection.snapshot()[2..];
    for variant in variants {
        assert_eq!(variant.name(), "Layer Cake (copy)");
        assert_eq!(variant.ingredients(), variants[0].ingredients());
        assert_eq!(variant.subrecipes().len(), 2);
    }
}

#[test]
fn zero_variants_is_reported() {
    let (factory, collection) = shared();
    let options = RunOptions {
        variants: Some(0),
        ..RunOptions::default()
    };
    let err = run_book(&RecipeBook::builtin(), &factory, &collection, &options).unwrap_err();
    assert!(matches!(err, DriverError::Variants(e) if e.is_invalid_argument()));
    assert_eq!(collection.len(), 2);
}

#[test]
fn failing_producer_is_surfaced() {
    let (factory, collection) = shared();
    let book = RecipeBook {
        recipes: vec![
            RecipeSpec::new("Beverage", "Tea", &[("tea", "1 bag")], "Steep."),
            RecipeSpec::new("", "Nameless", &[], ""),
        ],
    };

    let err = run_book(&book, &factory, &collection, &RunOptions::default()).unwrap_err();
    match err {
        DriverError::Producer { recipe, source } => {
            assert_eq!(recipe, "Nameless");
            assert!(source.is_invalid_argument());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(collection.len(), 1);
}

#[test]
fn book_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[recipes]]
category = "Sauce"
name = "Pesto"
ingredients = [["basil", "2 cups"], ["pine nuts", "1/3 cup"]]
instructions = "Blend."

[[recipes]]
category = "Sauce"
name = "Salsa"
ingredients = [["tomato", "4"]]
instructions = "Chop."
"#
    )
    .unwrap();

    let book = RecipeBook::load(file.path()).unwrap();
    let (factory, collection) = shared();
    run_book(&book, &factory, &collection, &RunOptions::default()).unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(factory.minted("Sauce"), 2);
    assert!(collection
        .snapshot_and_render()
        .contains("Ingredients: basil (2 cups), pine nuts (1/3 cup)"));
}

#[test]
fn missing_book_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RecipeBook::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, larder_cli::BookError::Io(_)));
}
