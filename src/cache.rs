//! Memo of validation reports shared by every analyzer in the process.
//!
//! A report depends on two things: the SQL text and which rules were
//! enabled. Entries are therefore keyed by the analyzer's rule profile (a
//! hash of its disabled rule ids) together with the full snippet text, so two
//! snippets never share a report even when their hashes collide. Entries
//! leave in insertion order once the capacity is reached.

use std::sync::{LazyLock, RwLock};

use compact_str::CompactString;
use indexmap::IndexMap;

use crate::analyzer::ValidationResult;

const DEFAULT_CAPACITY: usize = 1000;

static VALIDATION_CACHE: LazyLock<RwLock<ValidationCache>> =
    LazyLock::new(|| RwLock::new(ValidationCache::new(DEFAULT_CAPACITY)));

/// Bounded first-in first-out store of validation reports
#[derive(Debug)]
pub struct ValidationCache {
    entries:  IndexMap<(u64, CompactString), ValidationResult>,
    capacity: usize
}

impl ValidationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries:  IndexMap::with_capacity(capacity),
            capacity: capacity.max(1)
        }
    }

    pub fn get(&self, profile: u64, sql: &str) -> Option<ValidationResult> {
        self.entries
            .get(&(profile, CompactString::from(sql)))
            .cloned()
    }

    /// Store a report, dropping the oldest entries when full.
    ///
    /// Replacing the report of a known snippet keeps its original position.
    pub fn insert(&mut self, profile: u64, sql: &str, result: ValidationResult) {
        let key = (profile, CompactString::from(sql));
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.capacity {
                self.entries.shift_remove_index(0);
            }
        }
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Report cached for the rule set `profile`, if any
pub fn get_cached(profile: u64, sql: &str) -> Option<ValidationResult> {
    VALIDATION_CACHE.read().ok()?.get(profile, sql)
}

/// Remember a report; a poisoned lock skips caching
pub fn cache_result(profile: u64, sql: &str, result: ValidationResult) {
    if let Ok(mut cache) = VALIDATION_CACHE.write() {
        cache.insert(profile, sql, result);
    }
}
