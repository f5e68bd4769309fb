//! Naming transform: original base name + hash text -> hashed base name.

/// Default naming transform.
///
/// Splits `name` at the *first* dot so multi-part extensions survive intact:
/// `archive.tar.gz` becomes `archive_<hash>.tar.gz`, not
/// `archive.tar_<hash>.gz`. Names without a dot get the hash appended:
/// `foo` becomes `foo_<hash>`.
pub fn default_naming(name: &str, hash: &str) -> String {
    match name.split_once('.') {
        Some((stem, rest)) => format!("{stem}_{hash}.{rest}"),
        None => format!("{name}_{hash}"),
    }
}
