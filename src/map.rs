//! Ordered mapping type for SCDIL values.
//!
//! [`Mapping`] wraps an [`IndexMap`] from [`Key`] to [`Value`]. Entries keep
//! the position of their first insertion; inserting an existing key replaces
//! the value in place. Equality ignores order.
//!
//! String keys can be looked up with a plain `&str`:
//!
//! ```rust
//! use scdil::{Key, Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert(Key::from("name"), Value::from("Alice"));
//! map.insert(Key::Int(1), Value::from(30));
//!
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(map.get(&Key::Int(1)).and_then(|v| v.as_i64()), Some(30));
//! ```

use crate::{Key, Value};
use indexmap::{Equivalent, IndexMap};
use std::hash::Hash;

/// An insertion-ordered map from keys to values.
///
/// # Examples
///
/// ```rust
/// use scdil::{Key, Mapping, Value};
///
/// let mut map = Mapping::new();
/// map.insert(Key::from("first"), Value::from(1));
/// map.insert(Key::from("second"), Value::from(2));
/// map.insert(Key::from("first"), Value::from(3));
///
/// let keys: Vec<_> = map.keys().filter_map(Key::as_str).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// assert_eq!(map.get("first"), Some(&Value::from(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping(IndexMap<Key, Value>);

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.0.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Value>
    where
        Q: ?Sized + Hash + Equivalent<Key>,
    {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every key is a string, so the mapping can be written
    /// as a block mapping.
    #[must_use]
    pub fn has_string_keys(&self) -> bool {
        self.0.keys().all(Key::is_string)
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Key, Value> {
        self.0.iter_mut()
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Mapping(IndexMap::from_iter(iter))
    }
}

impl Extend<(Key, Value)> for Mapping {
    fn extend<T: IntoIterator<Item = (Key, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
