//! Asset map: original relative paths mapped to their hashed equivalents.

use std::collections::{BTreeMap, HashMap};

/// Map from original relative path to hashed relative path.
///
/// Paths are forward-slash separated with no leading `./`. Keys are ordered
/// so serialized output is deterministic across runs on identical input.
///
/// An `AssetMap` is either *present* (possibly empty) or *unset*. The unset
/// state backs the deployment pattern where hashing only runs in production:
/// in development no map is ever built and [`AssetMap::get`] transparently
/// becomes a no-op. `Default` yields the unset state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap {
    entries: Option<BTreeMap<String, String>>,
}

impl AssetMap {
    /// An empty but present map.
    pub fn new() -> Self {
        Self {
            entries: Some(BTreeMap::new()),
        }
    }

    /// The unset state: no mapping configured.
    pub fn unset() -> Self {
        Self { entries: None }
    }

    pub fn is_unset(&self) -> bool {
        self.entries.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a hashed path for an original path. Promotes an unset map to
    /// a present one.
    pub fn insert(&mut self, original: impl Into<String>, hashed: impl Into<String>) {
        self.entries
            .get_or_insert_with(BTreeMap::new)
            .insert(original.into(), hashed.into());
    }

    /// Look up the hashed path for `name`.
    ///
    /// On an unset map, `name` is returned unchanged, so templates can use
    /// `map.get(..)` identically in development (no map built) and
    /// production. On a present map a miss returns `""`.
    pub fn get<'a>(&'a self, name: &'a str) -> &'a str {
        match &self.entries {
            None => name,
            Some(entries) => entries.get(name).map(String::as_str).unwrap_or(""),
        }
    }

    /// Idiomatic companion to [`AssetMap::get`]: `None` on a miss or on an
    /// unset map.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.as_ref()?.get(name).map(String::as_str)
    }

    /// Iterate `(original, hashed)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .as_ref()
            .into_iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate original paths in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    /// Invert into a hashed-path -> original-path table.
    ///
    /// The forward map must be injective for the result to be complete. If
    /// two originals collide on the same hashed path, the later key wins and
    /// the earlier original becomes unreachable by hashed name. Collisions
    /// are not detected.
    pub fn invert(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(k, v)| (v.to_string(), k.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for AssetMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: Some(iter.into_iter().collect()),
        }
    }
}
