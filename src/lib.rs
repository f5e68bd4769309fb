//! Stampfs: Content-Hash Cache Busting
//!
//! Hashes every file in an asset tree, embeds the digest in the file name
//! (`foo.txt` becomes `foo_<hash>.txt`), and produces a map from original
//! paths to hashed paths. A read-through store wrapper resolves hashed names
//! back to the original content so callers never need to know the hash.

pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod hash;
pub mod hasher;
pub mod logging;
pub mod map;
pub mod naming;
pub mod options;
pub mod store;
pub mod wrapper;
