//! Testing utilities for the Larder workspace
//!
//! Shared fixtures and instrumented observers.

#![allow(missing_docs)]

use larder_collection::CollectionObserver;
use larder_recipe::{Recipe, RecipeFactory, RecipeId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn frosting(factory: &RecipeFactory) -> Recipe {
    factory
        .create(
            "Dessert",
            "Frosting",
            [("sugar", "1 cup"), ("butter", "1/2 cup"), ("vanilla", "1 tsp")],
            "Mix all ingredients until smooth.",
            Vec::new(),
        )
        .unwrap()
}

pub fn cake_base(factory: &RecipeFactory) -> Recipe {
    factory
        .create(
            "Dessert",
            "Cake Base",
            [("flour", "2 cups"), ("sugar", "1 cup"), ("eggs", "3")],
            "Mix ingredients and bake at 350°F for 30 minutes.",
            Vec::new(),
        )
        .unwrap()
}

pub fn layer_cake(factory: &RecipeFactory) -> Recipe {
    let subrecipes = vec![frosting(factory), cake_base(factory)];
    factory
        .create(
            "Dessert",
            "Layer Cake",
            [("milk", "1 cup"), ("baking powder", "1 tbsp")],
            "Prepare the layers and frost each layer.",
            subrecipes,
        )
        .unwrap()
}

pub fn lemonade(factory: &RecipeFactory) -> Recipe {
    factory
        .create(
            "Beverage",
            "Lemonade",
            [("water", "2 cups"), ("lemon", "1 whole"), ("sugar", "2 tbsp")],
            "Mix ingredients and serve cold.",
            Vec::new(),
        )
        .unwrap()
}

/// Observer that stalls inside the collection's critical section and records
/// every notification, to widen race windows in concurrency tests
#[derive(Debug)]
pub struct SlowObserver {
    delay: Duration,
    in_section: AtomicUsize,
    max_in_section: AtomicUsize,
    seen: Mutex<Vec<(RecipeId, usize)>>,
}

impl SlowObserver {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_section: AtomicUsize::new(0),
            max_in_section: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Notifications received, in order
    pub fn seen(&self) -> Vec<(RecipeId, usize)> {
        self.seen.lock().clone()
    }

    /// Largest number of notifications ever running at the same time
    pub fn max_concurrent(&self) -> usize {
        self.max_in_section.load(Ordering::SeqCst)
    }
}

impl CollectionObserver for SlowObserver {
    fn recipe_added(&self, recipe: &Recipe, position: usize) {
        let now = self.in_section.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_section.fetch_max(now, Ordering::SeqCst);

        std::thread::sleep(self.delay);
        self.seen.lock().push((recipe.id(), position));

        self.in_section.fetch_sub(1, Ordering::SeqCst);
    }
}
