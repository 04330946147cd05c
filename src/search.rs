use crate::index::EntityIndex;
use crate::normalize::normalize_simple;
use crate::types::IndexedEntity;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

/// Substring search over the normalized names of an [`EntityIndex`].
#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    index: &'a EntityIndex,
    limit: usize,
}

impl<'a> SearchIndex<'a> {
    pub fn new(index: &'a EntityIndex) -> Self {
        Self::with_limit(index, DEFAULT_MAX_SUGGESTIONS)
    }

    pub fn with_limit(index: &'a EntityIndex, limit: usize) -> Self {
        SearchIndex { index, limit }
    }

    /// Names containing the query, in first-occurrence order. An empty
    /// query yields nothing.
    pub fn suggest(&self, query: &str) -> Vec<&'a str> {
        let query = normalize_simple(query);
        if query.is_empty() {
            return Vec::new();
        }

        self.index
            .names()
            .keys()
            .filter(|key| key.contains(query.as_str()))
            .take(self.limit)
            .collect()
    }

    /// Exact lookup; `None` means the caller should do nothing.
    pub fn resolve(&self, name: &str) -> Option<&'a IndexedEntity> {
        self.index.by_key(&normalize_simple(name))
    }
}
