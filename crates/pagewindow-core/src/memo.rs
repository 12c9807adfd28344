//! Dependency-keyed memoization
//!
//! A [`Memo`] holds one derived value together with the key of the inputs it
//! was computed from. Reading with a different key recomputes; reading with
//! the same key hands back the cached value. Inputs that are not cheap to
//! compare (such as "the source was replaced") are folded into the key as a
//! [`Version`] that is bumped on each change.

use serde::{Deserialize, Serialize};

/// Monotonic change counter for one dependency
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Version(u64);

impl Version {
    /// Record a change
    pub const fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// A cached value and the dependency key it was derived from
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Create an empty memo
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: None,
            computations: 0,
        }
    }

    /// Return the cached value for `key`, computing it first if the cache
    /// is empty or was filled under a different key
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        if !self.is_fresh(&key) {
            self.slot = None;
            self.computations += 1;
        }
        let (_, value) = self.slot.get_or_insert_with(|| (key, compute()));
        value
    }

    /// Whether a value computed under `key` is cached
    #[must_use]
    pub fn is_fresh(&self, key: &K) -> bool {
        matches!(&self.slot, Some((cached, _)) if cached == key)
    }

    /// How many times the value has been computed
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }
}
