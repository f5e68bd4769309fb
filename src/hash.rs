//! Tree walker, hashing operation, and directory materializer.
//!
//! All three operations share one depth-first pre-order traversal. Exclusion
//! is decided per entry before descending or processing: an excluded
//! directory prunes its entire subtree, an excluded file is skipped. The
//! first I/O error aborts the whole operation; a map returned alongside an
//! error must be discarded.

use crate::error::StampError;
use crate::map::AssetMap;
use crate::options::Options;
use crate::store::Store;
use digest::DynDigest;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

/// Hash every non-excluded file in `store` and return the map from original
/// relative paths to hashed relative paths. No files are written.
pub fn hash<S: Store + ?Sized>(store: &S, opts: &Options) -> Result<AssetMap, StampError> {
    let mut digest = opts.algorithm.hasher();
    let mut map = AssetMap::new();
    walk(store, "", opts, digest.as_mut(), &mut map, None)?;
    Ok(map)
}

/// Hash every non-excluded file in `store` and write a copy of each under
/// its hashed name below `out_root`, mirroring the directory structure.
///
/// `out_root` may alias the store's own root (in-place hashing): sources are
/// only ever read, never truncated or deleted. Copies carry the source
/// permission bits masked to `0o555` so artifacts come out read-only.
pub fn hash_to_dir<S: Store + ?Sized>(
    store: &S,
    out_root: &Path,
    opts: &Options,
) -> Result<AssetMap, StampError> {
    fs::create_dir_all(out_root)?;
    let mut digest = opts.algorithm.hasher();
    let mut map = AssetMap::new();
    walk(store, "", opts, digest.as_mut(), &mut map, Some(out_root))?;
    Ok(map)
}

/// [`hash_to_dir`] into a fresh temporary directory.
///
/// The returned [`TempDir`] guard removes the directory when dropped.
pub fn hash_to_temp_dir<S: Store + ?Sized>(
    store: &S,
    opts: &Options,
) -> Result<(TempDir, AssetMap), StampError> {
    let dir = tempfile::Builder::new().prefix("stampfs").tempdir()?;
    let map = hash_to_dir(store, dir.path(), opts)?;
    Ok((dir, map))
}

fn walk<S: Store + ?Sized>(
    store: &S,
    dir: &str,
    opts: &Options,
    digest: &mut dyn DynDigest,
    map: &mut AssetMap,
    out_root: Option<&Path>,
) -> Result<(), StampError> {
    for entry in store.entries(dir)? {
        let rel = join(dir, &entry.name);

        if (opts.ignore)(&rel) {
            debug!(path = %rel, "excluded");
            continue;
        }

        if entry.is_dir {
            if let Some(out_root) = out_root {
                ensure_dir(&out_root.join(&rel))?;
            }
            walk(store, &rel, opts, digest, map, out_root)?;
        } else {
            let hashed = hash_file(store, &rel, opts, digest)?;
            if let Some(out_root) = out_root {
                copy_hashed(store, &rel, &out_root.join(&hashed))?;
            }
            debug!(path = %rel, hashed = %hashed, "hashed");
            map.insert(rel, hashed);
        }
    }
    Ok(())
}

/// Stream one file through the digest and return its hashed relative path.
/// The read handle is dropped before this returns, so the materializer's
/// second open never races a live handle.
fn hash_file<S: Store + ?Sized>(
    store: &S,
    rel: &str,
    opts: &Options,
    digest: &mut dyn DynDigest,
) -> Result<String, StampError> {
    let raw = {
        let mut reader = store.open(rel)?;
        crate::hasher::digest_reader(digest, reader.as_mut())?
    };

    let text = (opts.encode)(&raw);
    let (dir_prefix, base) = split_base(rel);
    Ok(format!("{dir_prefix}{}", (opts.naming)(base, &text)))
}

/// Copy one source file to its hashed destination, create-or-truncate, then
/// clamp the copy's permissions to source mode masked with `0o555`.
fn copy_hashed<S: Store + ?Sized>(
    store: &S,
    rel: &str,
    dest: &Path,
) -> Result<(), StampError> {
    let mode = store.mode(rel)?;

    {
        let mut reader = store.open(rel)?;
        let mut out = match fs::File::create(dest) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                // A previous run left a read-only artifact under this name;
                // replace it instead of truncating in place.
                fs::remove_file(dest)?;
                fs::File::create(dest)?
            }
            Err(e) => return Err(e.into()),
        };
        io::copy(&mut reader.as_mut(), &mut out)?;
    }

    set_artifact_mode(dest, mode)
}

fn set_artifact_mode(dest: &Path, source_mode: u32) -> Result<(), StampError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, fs::Permissions::from_mode(source_mode & 0o555))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (dest, source_mode);
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), StampError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Split a relative path into its directory prefix (including the trailing
/// slash, or empty) and base name.
fn split_base(rel: &str) -> (&str, &str) {
    match rel.rfind('/') {
        Some(i) => (&rel[..=i], &rel[i + 1..]),
        None => ("", rel),
    }
}
