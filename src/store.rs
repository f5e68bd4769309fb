//! Hierarchical byte-store abstraction over which hashing operates.
//!
//! Paths handed to a store are relative, forward-slash separated, with no
//! leading `./` (stores tolerate one and strip it). The empty string names
//! the store root.

use crate::error::StampError;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// One directory entry as presented by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// A readable hierarchy of files.
///
/// `entries` must return children sorted by name; that ordering is the
/// traversal-order contract the walker relies on for determinism.
pub trait Store {
    /// List the children of `dir`, sorted by name.
    fn entries(&self, dir: &str) -> Result<Vec<Entry>, StampError>;

    /// Open `path` for reading.
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, StampError>;

    /// Permission bits of `path`.
    fn mode(&self, path: &str) -> Result<u32, StampError>;

    /// Fully read `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, StampError> {
        let mut buf = Vec::new();
        self.open(path)?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

fn trim_dot_slash(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// Store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        let rel = trim_dot_slash(rel);
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }
}

impl Store for DirStore {
    fn entries(&self, dir: &str) -> Result<Vec<Entry>, StampError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(dir))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type()?.is_dir();
            entries.push(Entry { name, is_dir });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, StampError> {
        let file = fs::File::open(self.resolve(path))?;
        Ok(Box::new(file))
    }

    fn mode(&self, path: &str) -> Result<u32, StampError> {
        let metadata = fs::metadata(self.resolve(path))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            Ok(metadata.permissions().mode())
        }
        #[cfg(not(unix))]
        {
            Ok(if metadata.is_dir() { 0o755 } else { 0o644 })
        }
    }
}

/// In-memory store keyed by relative path.
///
/// Serves as the test double for traversal logic and as a store for assets
/// embedded in the binary. Directories exist implicitly through the paths of
/// the files beneath them.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        let path = path.into();
        self.files
            .insert(trim_dot_slash(&path).to_string(), content.into());
    }

    fn is_implicit_dir(&self, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.files.keys().any(|k| k.starts_with(&prefix))
    }
}

impl Store for MemStore {
    fn entries(&self, dir: &str) -> Result<Vec<Entry>, StampError> {
        let dir = trim_dot_slash(dir);
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        // BTreeSet keeps children sorted and deduplicates implicit directories.
        let mut children = BTreeSet::new();
        for key in self.files.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => children.insert((child.to_string(), true)),
                None => children.insert((rest.to_string(), false)),
            };
        }

        if children.is_empty() && !dir.is_empty() && !self.is_implicit_dir(dir) {
            return Err(StampError::NotFound(dir.to_string()));
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| Entry { name, is_dir })
            .collect())
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, StampError> {
        let path = trim_dot_slash(path);
        let content = self
            .files
            .get(path)
            .ok_or_else(|| StampError::NotFound(path.to_string()))?;
        Ok(Box::new(content.as_slice()))
    }

    fn mode(&self, path: &str) -> Result<u32, StampError> {
        let path = trim_dot_slash(path);
        if self.files.contains_key(path) {
            Ok(0o644)
        } else if self.is_implicit_dir(path) {
            Ok(0o755)
        } else {
            Err(StampError::NotFound(path.to_string()))
        }
    }
}
