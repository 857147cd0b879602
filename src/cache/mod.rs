//! Cache module for storing dictionary responses on disk
//!
//! Every word ever looked up is kept as a compressed blob in one file under the
//! user's home directory. Entries never expire and are never evicted.

mod manager;

pub use manager::{compress, decompress, CacheError, CacheStore};
