//! Per-invocation tally of post fields

use crate::api::Post;
use std::collections::BTreeMap;

/// Counts how often each key appears across rendered posts
#[derive(Debug, Default, Clone)]
pub struct FieldStats {
    counts: BTreeMap<String, usize>,
}

impl FieldStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every key carried by `post` (nested replies are not included)
    pub fn record(&mut self, post: &Post) {
        for key in post.keys() {
            *self.counts.entry(key.clone()).or_insert(0) += 1;
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Keys in alphabetical order with their counts
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
