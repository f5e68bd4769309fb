//! Digest algorithm selection and streaming hash computation.

use crate::error::StampError;
use digest::DynDigest;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Read buffer size for streaming file content through a digest.
const CHUNK_SIZE: usize = 64 * 1024;

/// Closed set of digest algorithms selectable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// 128-bit, not collision resistant. Kept for short names where
    /// cryptographic strength is irrelevant.
    Md5,
    /// 256-bit, the default.
    #[default]
    Sha256,
    /// 512-bit.
    Sha512,
}

impl Algorithm {
    /// Create one resettable digest instance for the duration of an operation.
    ///
    /// The instance is reset before each file, so a single instance serves a
    /// whole traversal without cross-file contamination.
    pub fn hasher(&self) -> Box<dyn DynDigest> {
        match self {
            Algorithm::Md5 => Box::new(md5::Md5::default()),
            Algorithm::Sha256 => Box::new(sha2::Sha256::default()),
            Algorithm::Sha512 => Box::new(sha2::Sha512::default()),
        }
    }
}

impl FromStr for Algorithm {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(Algorithm::Md5),
            "sha256" => Ok(Algorithm::Sha256),
            "sha512" => Ok(Algorithm::Sha512),
            _ => Err(StampError::Config(format!(
                "unknown hash algorithm: {s} (expected md5, sha256, or sha512)"
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Md5 => write!(f, "md5"),
            Algorithm::Sha256 => write!(f, "sha256"),
            Algorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

/// Reset the digest, stream all bytes from `reader` through it, and return
/// the raw digest bytes.
///
/// A read failure aborts the whole enclosing operation; there is no
/// per-file recovery.
pub fn digest_reader(
    digest: &mut dyn DynDigest,
    reader: &mut dyn Read,
) -> Result<Vec<u8>, StampError> {
    digest.reset();

    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        digest.update(&buf[..n]);
    }

    Ok(digest.finalize_reset().to_vec())
}
