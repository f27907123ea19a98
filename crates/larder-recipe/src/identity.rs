//! Recipe identity allocation
//!
//! Provides [`IdentityAllocator`], a monotonically increasing id source that is
//! constructed once and shared (usually behind an `Arc`) by every factory in a
//! process.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique recipe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl RecipeId {
    /// Raw integer value
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thread-safe monotonic id source
///
/// Every value returned by [`next_id`](Self::next_id) is strictly greater than
/// every value returned before it, across all threads.
#[derive(Debug)]
pub struct IdentityAllocator {
    first: u64,
    next: AtomicU64,
}

impl IdentityAllocator {
    /// Create allocator whose first id is `1`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create allocator whose first id is `first`
    #[inline]
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            first,
            next: AtomicU64::new(first),
        }
    }

    /// Allocate the next id
    ///
    /// # Panics
    /// Panics if the `u64` id space is exhausted. The counter is left
    /// untouched, so every later call panics too.
    #[inline]
    pub fn next_id(&self) -> RecipeId {
        match self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
        {
            Ok(id) => RecipeId(id),
            Err(_) => panic!("recipe id space exhausted"),
        }
    }

    /// Most recently issued id, if any
    #[must_use]
    pub fn last_issued(&self) -> Option<RecipeId> {
        let next = self.next.load(Ordering::SeqCst);
        (next != self.first).then(|| RecipeId(next - 1))
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn starts_at_one() {
        let allocator = IdentityAllocator::new();
        assert_eq!(allocator.last_issued(), None);
        assert_eq!(allocator.next_id(), RecipeId(1));
        assert_eq!(allocator.next_id(), RecipeId(2));
        assert_eq!(allocator.last_issued(), Some(RecipeId(2)));
    }

    #[test]
    fn starting_at_offsets_first_id() {
        let allocator = IdentityAllocator::starting_at(100);
        assert_eq!(allocator.last_issued(), None);
        assert_eq!(allocator.next_id(), RecipeId(100));
        assert_eq!(allocator.last_issued(), Some(RecipeId(100)));
    }

    #[test]
    fn exhausted_allocator_never_wraps() {
        let allocator = IdentityAllocator::starting_at(u64::MAX - 1);
        assert_eq!(allocator.next_id(), RecipeId(u64::MAX - 1));

        for _ in 0..2 {
            let exhausted = std::panic::catch_unwind(|| allocator.next_id());
            assert!(exhausted.is_err());
        }
        assert_eq!(allocator.last_issued(), Some(RecipeId(u64::MAX - 1)));
    }

    #[test]
    fn concurrent_ids_are_distinct_and_increasing_per_thread() {
        let allocator = Arc::new(IdentityAllocator::new());

        let per_thread: Vec<Vec<RecipeId>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let allocator = Arc::clone(&allocator);
                    scope.spawn(move || (0..500).map(|_| allocator.next_id()).collect::<Vec<_>>())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for ids in &per_thread {
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }

        let all: HashSet<RecipeId> = per_thread.into_iter().flatten().collect();
        assert_eq!(all.len(), 8 * 500);
        assert_eq!(allocator.last_issued(), Some(RecipeId(4000)));
    }
}
