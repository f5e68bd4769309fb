//! Configuration bundle for hashing operations.

use crate::hasher::Algorithm;
use crate::naming::default_naming;

/// Naming transform: (original base name, hash text) -> hashed base name.
pub type NamingFn = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Hash-to-text encoder over raw digest bytes.
pub type EncodeFn = Box<dyn Fn(&[u8]) -> String + Send + Sync>;

/// Exclusion predicate over relative paths. A `true` result skips a file, or
/// prunes a whole subtree when the path is a directory.
pub type IgnoreFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Options for one hashing or materialization operation.
///
/// Defaults: sha256, lowercase hex, [`default_naming`], nothing excluded.
/// An `Options` value is read-only while an operation runs; concurrent
/// operations must each own their own value.
pub struct Options {
    /// Digest algorithm. One digest instance is created per operation and
    /// reset before each file.
    pub algorithm: Algorithm,

    /// Naming transform applied to each file's base name.
    pub naming: NamingFn,

    /// Encoder turning raw digest bytes into the text embedded in names.
    pub encode: EncodeFn,

    /// Exclusion predicate, called for every file and directory.
    pub ignore: IgnoreFn,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            naming: Box::new(|name, hash| default_naming(name, hash)),
            encode: Box::new(|raw: &[u8]| hex::encode(raw)),
            ignore: Box::new(|_| false),
        }
    }
}

/// Build an exclusion predicate that skips every path starting with one of
/// `prefixes`.
pub fn ignore_prefixes<I, S>(prefixes: I) -> IgnoreFn
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
    Box::new(move |path| prefixes.iter().any(|p| path.starts_with(p.as_str())))
}
