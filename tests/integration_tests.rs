//! End-to-end tests over a real directory tree: hash, materialize, wrap.

use stampfs::hash::{hash, hash_to_dir, hash_to_temp_dir};
use stampfs::options::{ignore_prefixes, Options};
use stampfs::store::{DirStore, Store};
use stampfs::wrapper;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// foo.txt, archive.tar.gz, folder/maja.webp, plain (no extension)
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("foo.txt"), "hello").unwrap();
    fs::write(root.join("archive.tar.gz"), "tarball bytes").unwrap();
    fs::write(root.join("plain"), "no extension").unwrap();
    fs::create_dir(root.join("folder")).unwrap();
    fs::write(root.join("folder").join("maja.webp"), "webp bytes").unwrap();
    dir
}

fn assert_tree_matches(map: &stampfs::map::AssetMap, source_root: &Path, out_root: &Path) {
    for (original, hashed) in map.iter() {
        let want = fs::read(source_root.join(original)).unwrap();
        let got = fs::read(out_root.join(hashed)).unwrap();
        assert_eq!(want, got, "{original} -> {hashed}");
    }
}

#[test]
fn hash_produces_expected_default_names() {
    let dir = fixture();
    let map = hash(&DirStore::new(dir.path()), &Options::default()).unwrap();

    assert_eq!(map.len(), 4);
    assert_eq!(map.get("foo.txt"), format!("foo_{HELLO_SHA256}.txt"));

    let archive = map.get("archive.tar.gz");
    assert!(archive.starts_with("archive_") && archive.ends_with(".tar.gz"));

    let plain = map.get("plain");
    assert!(plain.starts_with("plain_") && !plain.contains('.'));

    assert!(map.get("folder/maja.webp").starts_with("folder/maja_"));
}

#[test]
fn hash_twice_yields_identical_names() {
    let dir = fixture();
    let store = DirStore::new(dir.path());
    let first = hash(&store, &Options::default()).unwrap();
    let second = hash(&store, &Options::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn excluded_directory_has_no_entries_beneath_it() {
    let dir = fixture();
    let opts = Options {
        ignore: ignore_prefixes(["folder"]),
        ..Options::default()
    };
    let map = hash(&DirStore::new(dir.path()), &opts).unwrap();

    assert_eq!(map.len(), 3);
    assert!(map.keys().all(|k| !k.starts_with("folder")));
}

#[test]
fn materialize_into_separate_directory() {
    let dir = fixture();
    let out = TempDir::new().unwrap();
    let store = DirStore::new(dir.path());

    let map = hash_to_dir(&store, out.path(), &Options::default()).unwrap();

    assert_eq!(map, hash(&store, &Options::default()).unwrap());
    assert_tree_matches(&map, dir.path(), out.path());
    // Sources are untouched.
    assert_eq!(fs::read(dir.path().join("foo.txt")).unwrap(), b"hello");
}

#[cfg(unix)]
#[test]
fn materialize_masks_permissions_to_read_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = fixture();
    fs::set_permissions(
        dir.path().join("plain"),
        fs::Permissions::from_mode(0o755),
    )
    .unwrap();

    let out = TempDir::new().unwrap();
    let map = hash_to_dir(&DirStore::new(dir.path()), out.path(), &Options::default()).unwrap();

    let mode = |rel: &str| {
        fs::metadata(out.path().join(map.get(rel)))
            .unwrap()
            .permissions()
            .mode()
            & 0o777
    };
    // Executable source keeps execute bits, loses write bits.
    assert_eq!(mode("plain"), 0o555);
    // Regular 0o644 source becomes 0o444.
    fs::set_permissions(
        dir.path().join("foo.txt"),
        fs::Permissions::from_mode(0o644),
    )
    .unwrap();
    let map = hash_to_dir(&DirStore::new(dir.path()), out.path(), &Options::default()).unwrap();
    assert_eq!(
        fs::metadata(out.path().join(map.get("foo.txt")))
            .unwrap()
            .permissions()
            .mode()
            & 0o777,
        0o444
    );
}

#[test]
fn in_place_materialization_is_stable_for_source_files() {
    let dir = fixture();
    let store = DirStore::new(dir.path());

    let first = hash_to_dir(&store, dir.path(), &Options::default()).unwrap();
    let second = hash_to_dir(&store, dir.path(), &Options::default()).unwrap();

    // The second run sees the first run's artifacts too, but every original
    // file maps to the same hashed name and its artifact survives intact.
    for (original, hashed) in first.iter() {
        assert_eq!(second.get(original), hashed);
        assert_eq!(
            fs::read(dir.path().join(original)).unwrap(),
            fs::read(dir.path().join(hashed)).unwrap()
        );
    }
}

#[test]
fn temp_dir_materialization_round_trips() {
    let dir = fixture();
    let store = DirStore::new(dir.path());

    let (out, map) = hash_to_temp_dir(&store, &Options::default()).unwrap();
    assert_tree_matches(&map, dir.path(), out.path());
}

#[test]
fn wrapper_round_trips_every_mapping_entry() {
    let dir = fixture();
    let store = DirStore::new(dir.path());

    let (wrapper, map) = wrapper::wrap(&store, &Options::default()).unwrap();

    for (original, hashed) in map.iter() {
        assert_eq!(
            store.read(original).unwrap(),
            wrapper.read(hashed).unwrap(),
            "{original} -> {hashed}"
        );
    }
}

#[test]
fn wrapper_serves_excluded_files_by_original_name() {
    let dir = fixture();
    let store = DirStore::new(dir.path());
    let opts = Options {
        ignore: ignore_prefixes(["folder"]),
        ..Options::default()
    };

    let (wrapper, map) = wrapper::wrap(&store, &opts).unwrap();

    assert_eq!(map.lookup("folder/maja.webp"), None);
    assert_eq!(wrapper.read("folder/maja.webp").unwrap(), b"webp bytes");
}
