//! Generated-source emission for the asset map.

use crate::error::StampError;
use crate::map::AssetMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Write a Rust source file declaring `map` as a table-valued constant.
///
/// Entries are emitted sorted by original path, so two runs over identical
/// input produce byte-identical output.
pub fn write_map_source(map: &AssetMap, path: &Path, var_name: &str) -> Result<(), StampError> {
    fs::write(path, render_map_source(map, var_name))?;
    Ok(())
}

fn render_map_source(map: &AssetMap, var_name: &str) -> String {
    let mut out = String::new();
    out.push_str("// Code generated by stampfs. Do not edit.\n\n");
    out.push_str("/// Original asset paths and their content-hashed names.\n");
    let _ = writeln!(out, "pub static {var_name}: &[(&str, &str)] = &[");
    for (original, hashed) in map.iter() {
        let _ = writeln!(out, "    ({original:?}, {hashed:?}),");
    }
    out.push_str("];\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_map() -> AssetMap {
        let mut map = AssetMap::new();
        map.insert("z.txt", "z_11.txt");
        map.insert("a.txt", "a_22.txt");
        map.insert("sub/b.css", "sub/b_33.css");
        map
    }

    #[test]
    fn test_render_sorted_by_key() {
        let source = render_map_source(&test_map(), "ASSET_NAMES");
        let a = source.find("a.txt").unwrap();
        let sub = source.find("sub/b.css").unwrap();
        let z = source.find("z.txt").unwrap();
        assert!(a < sub && sub < z);
    }

    #[test]
    fn test_render_shape() {
        let source = render_map_source(&test_map(), "FILE_NAMES");
        assert!(source.starts_with("// Code generated by stampfs."));
        assert!(source.contains("pub static FILE_NAMES: &[(&str, &str)] = &["));
        assert!(source.contains(r#"    ("a.txt", "a_22.txt"),"#));
        assert!(source.ends_with("];\n"));
    }

    #[test]
    fn test_render_reproducible() {
        let first = render_map_source(&test_map(), "ASSET_NAMES");
        let second = render_map_source(&test_map(), "ASSET_NAMES");
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_map_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("asset_map.rs");
        write_map_source(&test_map(), &path, "ASSET_NAMES").unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_map_source(&test_map(), "ASSET_NAMES"));
    }
}
