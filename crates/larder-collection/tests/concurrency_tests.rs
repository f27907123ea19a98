//! Functional tests for concurrent use of the shared collection.
//!
//! These exercise the single serialization point of the catalog:
//! - No add is lost when many producers write at once.
//! - Adds are never interleaved with each other.
//! - A render taken while producers are running only ever shows whole recipes.

use larder_collection::{NoopObserver, RecipeCollection, VariantTemplate};
use larder_recipe::prelude::*;
use larder_test_utils::{layer_cake, lemonade, SlowObserver};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::time::Duration;

/// K concurrent workers each add once; the collection ends with exactly K
/// entries and the observer saw every position exactly once.
#[test]
fn concurrent_adds_are_not_lost() {
    const WORKERS: usize = 128;

    let observer = Arc::new(SlowObserver::new(Duration::from_micros(200)));
    let collection = Arc::new(RecipeCollection::with_observer(observer.clone()));
    let factory = Arc::new(RecipeFactory::default());
    let barrier = Arc::new(Barrier::new(WORKERS));

    std::thread::scope(|scope| {
        for _ in 0..WORKERS {
            let (collection, factory, barrier) = (
                Arc::clone(&collection),
                Arc::clone(&factory),
                Arc::clone(&barrier),
            );
            scope.spawn(move || {
                let recipe = lemonade(&factory);
                barrier.wait();
                collection.add(recipe);
            });
        }
    });

    assert_eq!(collection.len(), WORKERS);

    let ids: HashSet<RecipeId> = collection.ids().into_iter().collect();
    assert_eq!(ids.len(), WORKERS);

    let seen = observer.seen();
    let positions: Vec<usize> = seen.iter().map(|&(_, p)| p).collect();
    assert_eq!(positions, (0..WORKERS).collect::<Vec<_>>());
    assert_eq!(
        seen.iter().map(|&(id, _)| id).collect::<Vec<_>>(),
        collection.ids()
    );
    assert_eq!(observer.max_concurrent(), 1);
}

/// Two producers mirroring the demo driver: a nested cake and a lemonade.
#[test]
fn two_producers_build_trees_concurrently() {
    let collection = Arc::new(RecipeCollection::with_observer(Arc::new(NoopObserver)));
    let factory = Arc::new(RecipeFactory::default());

    std::thread::scope(|scope| {
        let (c, f) = (Arc::clone(&collection), Arc::clone(&factory));
        scope.spawn(move || c.add(layer_cake(&f)));
        let (c, f) = (Arc::clone(&collection), Arc::clone(&factory));
        scope.spawn(move || c.add(lemonade(&f)));
    });

    let snapshot = collection.snapshot();
    assert_eq!(snapshot.len(), 2);

    let cake = snapshot.iter().find(|r| r.name() == "Layer Cake").unwrap();
    assert_eq!(cake.subrecipes().len(), 2);
    assert_eq!(cake.tree_size(), 3);

    let rendered = collection.snapshot_and_render();
    assert_eq!(rendered.lines().count(), 4 * 3);
    assert!(rendered.contains("Ingredients: water (2 cups), lemon (1 whole), sugar (2 tbsp)"));
}

/// Every render taken while writers are active is a whole number of
/// three-line leaf recipes.
#[test]
fn renders_during_writes_never_show_partial_recipes() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 50;

    let collection = Arc::new(RecipeCollection::with_observer(Arc::new(NoopObserver)));
    let factory = Arc::new(RecipeFactory::default());

    let renders: Vec<String> = std::thread::scope(|scope| {
        for _ in 0..WRITERS {
            let (c, f) = (Arc::clone(&collection), Arc::clone(&factory));
            scope.spawn(move || {
                for _ in 0..PER_WRITER {
                    c.add(lemonade(&f));
                }
            });
        }

        let c = Arc::clone(&collection);
        let reader = scope.spawn(move || (0..200).map(|_| c.snapshot_and_render()).collect::<Vec<_>>());
        reader.join().unwrap()
    });

    for render in renders {
        if render.is_empty() {
            continue;
        }
        let lines: Vec<&str> = render.lines().collect();
        assert_eq!(lines.len() % 3, 0);
        for chunk in lines.chunks(3) {
            assert!(chunk[0].starts_with("ID: "));
            assert!(chunk[1].starts_with("Ingredients: "));
            assert!(chunk[2].starts_with("Instructions: "));
        }
    }

    assert_eq!(collection.len(), WRITERS * PER_WRITER);
}

/// Variant generation running on several threads at once still adds
/// `count` recipes per call with globally distinct ids.
#[test]
fn concurrent_variant_generation() {
    use rayon::prelude::*;

    let collection = RecipeCollection::with_observer(Arc::new(NoopObserver));
    let factory = RecipeFactory::default();

    let batches: Vec<Vec<RecipeId>> = (0..16)
        .into_par_iter()
        .map(|i| {
            let template = VariantTemplate::new("Dessert", format!("Cookie {i}"), "Bake.")
                .with_ingredients([("flour", "1 cup"), ("butter", "1/2 cup")]);
            collection
                .generate_variants(template, &RecipePatch::new(), 5, &factory)
                .unwrap()
        })
        .collect();

    assert_eq!(collection.len(), 16 * 5);
    let all: HashSet<RecipeId> = batches.iter().flatten().copied().collect();
    assert_eq!(all.len(), 16 * 5);
    assert_eq!(factory.minted("Dessert"), 16 * 5);
}
