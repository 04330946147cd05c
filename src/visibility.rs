use crate::types::{Category, IndexedEntity};
use std::collections::HashSet;

/// Categories whose markers are currently shown. An empty set hides everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet {
    active: HashSet<Category>,
}

impl Default for VisibilitySet {
    fn default() -> Self {
        VisibilitySet {
            active: Category::ALL.into_iter().collect(),
        }
    }
}

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, category: Category) {
        if !self.active.remove(&category) {
            self.active.insert(category);
        }
    }

    pub fn set_active(&mut self, category: Category, active: bool) {
        if active {
            self.active.insert(category);
        } else {
            self.active.remove(&category);
        }
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.active.contains(&category)
    }

    pub fn is_visible(&self, entity: &IndexedEntity) -> bool {
        self.is_active(entity.category)
    }

    /// Re-evaluate the predicate over the full list.
    pub fn filter<'a>(
        &'a self,
        entities: &'a [IndexedEntity],
    ) -> impl Iterator<Item = &'a IndexedEntity> + 'a {
        entities.iter().filter(move |e| self.is_visible(e))
    }
}
