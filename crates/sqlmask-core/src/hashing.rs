//! Column name hashing.

use md5::{Digest, Md5};

use crate::types::ColumnMap;

/// Maps a column name to its replacement.
///
/// Implementations must be deterministic: the same name always yields the
/// same hash.
pub trait ColumnHasher {
    fn hash(&self, name: &str) -> String;
}

/// MD5 of the UTF-8 name as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hasher;

impl ColumnHasher for Md5Hasher {
    fn hash(&self, name: &str) -> String {
        format!("{:x}", Md5::digest(name.as_bytes()))
    }
}

/// Per-query memo of column name to hash, in first-seen order.
#[derive(Debug, Clone)]
pub struct ColumnHashMap<H = Md5Hasher> {
    hasher: H,
    entries: ColumnMap,
}

impl Default for ColumnHashMap<Md5Hasher> {
    fn default() -> Self {
        Self::new(Md5Hasher)
    }
}

impl<H: ColumnHasher> ColumnHashMap<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            entries: ColumnMap::new(),
        }
    }

    /// Returns the hash for `name`, computing and recording it on first use.
    pub fn lookup_or_create(&mut self, name: &str) -> String {
        if let Some(hash) = self.entries.get(name) {
            return hash.clone();
        }
        let hash = self.hasher.hash(name);
        self.entries.insert(name.to_string(), hash.clone());
        hash
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> ColumnMap {
        self.entries
    }
}
