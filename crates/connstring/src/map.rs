//! Insertion-ordered string map holding parsed pairs.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::error::{AllocError, MapError, ParseError};

/// Entry predicate: an entry is stored only if this returns `true`.
pub type MapFilter = fn(key: &str, value: &str) -> bool;

/// String-keyed, string-valued map that remembers insertion order.
///
/// Keys and values are copied in; the map never borrows from the buffers
/// it was filled from.
#[derive(Clone, Default)]
pub struct Map {
    entries: Vec<(String, String)>,
    index: BTreeMap<String, usize>,
    filter: Option<MapFilter>,
}

impl Map {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map that only accepts entries passing `filter`.
    #[must_use]
    pub fn with_filter(filter: MapFilter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    /// Creates a map seeded with the entries (and filter) of `parent`.
    #[must_use]
    pub fn with_parent(parent: &Map) -> Self {
        parent.clone()
    }

    /// Inserts `key` with `value` unless `key` is already present.
    ///
    /// # Errors
    ///
    /// [`MapError::DuplicateKey`] if the key exists, [`MapError::Rejected`]
    /// if the filter refuses the entry, [`MapError::Alloc`] if copying the
    /// entry fails. The map is unchanged on error.
    pub fn add(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        if self.index.contains_key(key) {
            return Err(MapError::DuplicateKey);
        }
        self.check_filter(key, value)?;
        self.push(key, value)?;
        Ok(())
    }

    /// Inserts `key`, replacing the value if it is already present.
    ///
    /// A replaced entry keeps its original position.
    ///
    /// # Errors
    ///
    /// [`MapError::Rejected`] if the filter refuses the entry,
    /// [`MapError::Alloc`] if copying fails.
    pub fn add_or_update(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        self.check_filter(key, value)?;
        match self.index.get(key) {
            Some(&slot) => {
                let owned = copy_str(value)?;
                self.entries[slot].1 = owned;
                Ok(())
            }
            None => self.push(key, value),
        }
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let slot = self.index.remove(key)?;
        let (_, value) = self.entries.remove(slot);
        for later in self.index.values_mut().filter(|s| **s > slot) {
            *later -= 1;
        }
        Some(value)
    }

    /// Looks up the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Whether any entry has `value`.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.entries.iter().any(|(_, v)| v == value)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    fn check_filter(&self, key: &str, value: &str) -> Result<(), MapError> {
        match self.filter {
            Some(filter) if !filter(key, value) => Err(MapError::Rejected),
            _ => Ok(()),
        }
    }

    fn push(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        let owned_key = copy_str(key)?;
        let owned_value = copy_str(value)?;
        let index_key = copy_str(key)?;
        self.entries.try_reserve(1).map_err(AllocError::from)?;
        self.index.insert(index_key, self.entries.len());
        self.entries.push((owned_key, owned_value));
        Ok(())
    }
}

/// Copies `s` into a new `String`, reporting allocation failure.
pub(crate) fn copy_str(s: &str) -> Result<String, AllocError> {
    let mut owned = String::new();
    owned.try_reserve_exact(s.len())?;
    owned.push_str(s);
    Ok(owned)
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Map {}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the entries as `key=value;key=value` in insertion order.
///
/// Keys and values are written verbatim, so the output parses back to an
/// equal map only when keys hold neither `=` nor `;`, values hold no `;`,
/// and the last value is non-empty.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for Map {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_str(s)
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a str, &'a str);
    type IntoIter = core::iter::Map<
        core::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let as_pair: fn(&'a (String, String)) -> (&'a str, &'a str) =
            |(k, v)| (k.as_str(), v.as_str());
        self.entries.iter().map(as_pair)
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Map {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
