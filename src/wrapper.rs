//! Read-through wrapper resolving hashed names back to original content.

use crate::error::StampError;
use crate::hash;
use crate::map::AssetMap;
use crate::options::Options;
use crate::store::Store;
use std::collections::HashMap;
use std::io::Read;

/// A read-only view over a backing store that accepts hashed file names.
///
/// A request for `foo_<hash>.txt` returns the contents of `foo.txt`. Names
/// with no reverse mapping pass through unchanged, so excluded or unhashed
/// files stay reachable under their original names. Contents are never
/// cached; every call re-reads the backing store.
pub struct StoreWrapper<'a, S: Store + ?Sized> {
    store: &'a S,
    reverse: HashMap<String, String>,
}

/// Hash `store` with the given options and wrap it so its files can be
/// opened by their hashed names. Also returns the forward map for use in
/// templates or generated output.
pub fn wrap<'a, S: Store + ?Sized>(
    store: &'a S,
    opts: &Options,
) -> Result<(StoreWrapper<'a, S>, AssetMap), StampError> {
    let map = hash::hash(store, opts)?;
    let reverse = map.invert();
    Ok((StoreWrapper { store, reverse }, map))
}

impl<'a, S: Store + ?Sized> StoreWrapper<'a, S> {
    /// Resolve a (possibly hashed) name to the backing store's path.
    pub fn resolve<'n>(&'n self, name: &'n str) -> &'n str {
        self.reverse.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Open the file behind `name`, resolving hashed names first. Backing
    /// store errors (e.g. not-found) propagate unchanged.
    pub fn open(&self, name: &str) -> Result<Box<dyn Read + '_>, StampError> {
        self.store.open(self.resolve(name))
    }

    /// Fully read the file behind `name`.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, StampError> {
        self.store.read(self.resolve(name))
    }
}
