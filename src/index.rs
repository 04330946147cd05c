use crate::categorize::categorize;
use crate::normalize::normalize_simple;
use crate::types::{Category, IndexedEntity, RawEntity};
use std::collections::HashMap;

/// Number of raw features per category, fixed at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: HashMap<Category, usize>,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Counts in `Category::ALL` order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    fn increment(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }
}

/// Normalized name -> position in the indexed list.
///
/// Keys keep the order of their first occurrence; a repeated key points at
/// the most recent entity with that name.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    keys: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NameIndex {
    fn insert(&mut self, key: String, position: usize) {
        if self.positions.insert(key.clone(), position).is_none() {
            self.keys.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Immutable result of indexing one feed.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    counts: CategoryCounts,
    indexed: Vec<IndexedEntity>,
    names: NameIndex,
}

impl EntityIndex {
    pub fn build(raw_entities: &[RawEntity]) -> Self {
        // Counting covers every feature, including ones that can't be placed.
        let mut counts = CategoryCounts::default();
        for raw in raw_entities {
            counts.increment(categorize(raw.category.as_deref()));
        }

        let indexed: Vec<IndexedEntity> = raw_entities
            .iter()
            .filter_map(|raw| {
                let coords = raw.coordinates?;
                let category = categorize(raw.category.as_deref());
                Some(IndexedEntity::from_raw(raw, category, coords))
            })
            .collect();

        let mut names = NameIndex::default();
        for (position, entity) in indexed.iter().enumerate() {
            let key = normalize_simple(&entity.name);
            if !key.is_empty() {
                names.insert(key, position);
            }
        }

        tracing::debug!(
            "Indexed {} of {} entities ({} searchable names)",
            indexed.len(),
            raw_entities.len(),
            names.len()
        );

        EntityIndex { counts, indexed, names }
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    pub fn indexed(&self) -> &[IndexedEntity] {
        &self.indexed
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    /// Exact lookup by an already normalized key.
    pub fn by_key(&self, key: &str) -> Option<&IndexedEntity> {
        self.names.get(key).and_then(|i| self.indexed.get(i))
    }
}
