//! Streaming SHA-256 digests of regular-file content.
use std::fs;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::errors::Error;

const CHUNK_SIZE: usize = 64 * 1024;

/// Digest and byte count of a file's content, collected in one read pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct ContentDigest {
    /// Number of bytes hashed.
    pub size: u64,
    /// Full lowercase hex SHA-256 of the content.
    pub sha256: String,
}

impl ContentDigest {
    /// Returns the first `len` hex characters of the digest, or the whole
    /// digest when `len` is `None` or longer than it.
    pub fn sha256_prefix(&self, len: Option<usize>) -> &str {
        match len {
            Some(len) if len < self.sha256.len() => &self.sha256[..len],
            _ => &self.sha256,
        }
    }
}

/// Computes a [`ContentDigest`] for a source of bytes.
pub trait ContentHasher {
    /// Hashes the whole content without buffering it in memory.
    fn content_digest(&self) -> Result<ContentDigest, Error>;
}

fn finish(context: Sha256, size: u64) -> ContentDigest {
    ContentDigest {
        size,
        sha256: format!("{:x}", context.finalize()),
    }
}

impl ContentHasher for &Path {
    fn content_digest(&self) -> Result<ContentDigest, Error> {
        let mut file = fs::File::open(self).map_err(|e| Error::access(self, &e))?;
        let mut context = Sha256::new();
        let mut buffer = vec![0; CHUNK_SIZE];
        let mut size = 0u64;

        loop {
            let bytes_read = match file.read(&mut buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::access(self, &e)),
            };

            if bytes_read == 0 {
                break; // End of file
            }
            context.update(&buffer[..bytes_read]);
            size += bytes_read as u64;
        }
        Ok(finish(context, size))
    }
}

impl ContentHasher for &[u8] {
    fn content_digest(&self) -> Result<ContentDigest, Error> {
        let mut context = Sha256::new();
        context.update(self);
        Ok(finish(context, self.len() as u64))
    }
}
