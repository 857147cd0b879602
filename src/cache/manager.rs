//! Cache store for persisting dictionary responses to disk
//!
//! Provides a `CacheStore` that keeps every looked-up word in memory as a
//! zlib-compressed blob and writes the whole mapping back to a single file
//! after each insertion.

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Version tag written at the start of the cache file
const CACHE_FORMAT_VERSION: u32 = 1;

/// Errors that can occur when loading or saving the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file exists but could not be read or written
    #[error("Cache file {path} is not accessible: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file exists but does not decode
    #[error("Cache file {path} is corrupt (delete it to start over): {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    /// The cache file was written by an incompatible version
    #[error("Cache file {path} has unsupported format version {found} (delete it to start over)")]
    UnsupportedVersion { path: PathBuf, found: u32 },

    /// The in-memory mapping could not be encoded
    #[error("Failed to encode cache: {0}")]
    Encode(#[source] bincode::Error),

    /// A blob could not be compressed or decompressed
    #[error("Cache compression failed: {0}")]
    Compression(#[source] io::Error),
}

/// File-backed mapping from lowercase word to compressed response bytes
///
/// The store is loaded once, only ever grows, and is rewritten in full after
/// every `put`. There is no locking: two processes writing at once lose
/// whichever entries the last writer had not seen.
#[derive(Debug)]
pub struct CacheStore {
    /// Path of the backing file
    path: PathBuf,
    /// Word -> zlib-compressed response
    entries: BTreeMap<String, Vec<u8>>,
}

impl CacheStore {
    /// Loads the cache from `path`
    ///
    /// Returns an empty store if the file does not exist. A file that exists
    /// but cannot be read or decoded is an error; nothing is recovered.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cache file yet, starting empty");
                return Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                });
            }
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        let entries = decode(&path, &bytes)?;
        debug!(path = %path.display(), entries = entries.len(), "loaded cache");
        Ok(Self { path, entries })
    }

    /// Returns the compressed blob for `word`, without decompressing it
    pub fn get(&self, word: &str) -> Option<&[u8]> {
        self.entries.get(&normalize(word)).map(Vec::as_slice)
    }

    /// Returns the decompressed response bytes for `word`
    pub fn get_raw(&self, word: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.get(word).map(decompress).transpose()
    }

    /// Compresses `raw` and stores it under `word`, then persists the whole cache
    pub fn put(&mut self, word: &str, raw: &[u8]) -> Result<(), CacheError> {
        let blob = compress(raw)?;
        debug!(
            word,
            raw_len = raw.len(),
            compressed_len = blob.len(),
            "caching response"
        );
        self.entries.insert(normalize(word), blob);
        self.save()
    }

    /// Writes the entire mapping to the backing file, replacing its contents
    fn save(&self) -> Result<(), CacheError> {
        let mut buf = CACHE_FORMAT_VERSION.to_le_bytes().to_vec();
        bincode::serialize_into(&mut buf, &self.entries).map_err(CacheError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, buf).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "saved cache");
        Ok(())
    }
}

/// Cache keys are case-insensitive
fn normalize(word: &str) -> String {
    word.to_lowercase()
}

fn decode(path: &Path, bytes: &[u8]) -> Result<BTreeMap<String, Vec<u8>>, CacheError> {
    let (version, body) = match bytes {
        [a, b, c, d, rest @ ..] => (u32::from_le_bytes([*a, *b, *c, *d]), rest),
        _ => {
            return Err(CacheError::Corrupt {
                path: path.to_path_buf(),
                source: Box::new(bincode::ErrorKind::Custom(
                    "file too short for a format header".to_string(),
                )),
            })
        }
    };

    if version != CACHE_FORMAT_VERSION {
        return Err(CacheError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: version,
        });
    }

    bincode::deserialize(body).map_err(|source| CacheError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// zlib-compresses a raw response
pub fn compress(raw: &[u8]) -> Result<Vec<u8>, CacheError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).map_err(CacheError::Compression)?;
    encoder.finish().map_err(CacheError::Compression)
}

/// Inflates a blob produced by [`compress`]
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>, CacheError> {
    let mut raw = Vec::new();
    ZlibDecoder::new(blob)
        .read_to_end(&mut raw)
        .map_err(CacheError::Compression)?;
    Ok(raw)
}
