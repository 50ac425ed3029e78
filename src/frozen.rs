//! Immutable, hashable ordered map.
//!
//! A [`FrozenMap`] is built once and never changes afterwards. It preserves
//! insertion order for iteration, but equality and hashing only look at the set
//! of entries, so two maps with the same entries in different orders are the
//! same key.
//!
//! ```rust
//! use scdil::{FrozenMap, Key};
//!
//! let a: FrozenMap = vec![(Key::from("x"), Key::Int(1)), (Key::from("y"), Key::Int(2))]
//!     .into_iter()
//!     .collect();
//! let b: FrozenMap = vec![(Key::from("y"), Key::Int(2)), (Key::from("x"), Key::Int(1))]
//!     .into_iter()
//!     .collect();
//! assert_eq!(a, b);
//! assert_eq!(a.get("x"), Some(&Key::Int(1)));
//! ```

use crate::Key;
use indexmap::{Equivalent, IndexMap};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::BitOr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrozenMap(IndexMap<Key, Key>);

impl FrozenMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        FrozenMap(IndexMap::new())
    }

    /// Creates a map with every key mapped to the same value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scdil::{FrozenMap, Key};
    ///
    /// let map = FrozenMap::from_keys(vec![Key::from("a"), Key::from("b")], Key::Null);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get("b"), Some(&Key::Null));
    /// ```
    pub fn from_keys<I>(keys: I, value: Key) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter().map(|k| (k, value.clone())).collect()
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&Key>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every key is a string.
    #[must_use]
    pub fn has_string_keys(&self) -> bool {
        self.0.keys().all(Key::is_string)
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Key> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Key> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Key> {
        self.0.iter()
    }

    /// Returns a new map with the entries of both maps.
    ///
    /// Entries from `other` replace those of `self` with an equal key; keys
    /// from `self` come first in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scdil::{FrozenMap, Key};
    ///
    /// let left: FrozenMap = vec![(Key::from("a"), Key::Int(1)), (Key::from("b"), Key::Int(2))]
    ///     .into_iter()
    ///     .collect();
    /// let right: FrozenMap = vec![(Key::from("c"), Key::Int(3)), (Key::from("a"), Key::Int(4))]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let merged = &left | &right;
    /// let keys: Vec<_> = merged.keys().filter_map(Key::as_str).collect();
    /// assert_eq!(keys, vec!["a", "b", "c"]);
    /// assert_eq!(merged.get("a"), Some(&Key::Int(4)));
    /// assert_eq!(left.get("a"), Some(&Key::Int(1)));
    /// ```
    #[must_use]
    pub fn union(&self, other: &FrozenMap) -> FrozenMap {
        let mut entries = self.0.clone();
        for (key, value) in other.iter() {
            entries.insert(key.clone(), value.clone());
        }
        FrozenMap(entries)
    }
}

impl Hash for FrozenMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // order-independent: combine per-entry hashes commutatively
        let combined = self.0.iter().fold(0u64, |acc, entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl BitOr for &FrozenMap {
    type Output = FrozenMap;

    fn bitor(self, rhs: &FrozenMap) -> FrozenMap {
        self.union(rhs)
    }
}

impl FromIterator<(Key, Key)> for FrozenMap {
    fn from_iter<T: IntoIterator<Item = (Key, Key)>>(iter: T) -> Self {
        FrozenMap(IndexMap::from_iter(iter))
    }
}

impl IntoIterator for FrozenMap {
    type Item = (Key, Key);
    type IntoIter = indexmap::map::IntoIter<Key, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrozenMap {
    type Item = (&'a Key, &'a Key);
    type IntoIter = indexmap::map::Iter<'a, Key, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
