//! Map-facing state for one loaded feed.
//!
//! A [`MapSession`] owns the immutable [`EntityIndex`] and the mutable
//! [`VisibilitySet`]. The caller's event layer (checkbox changes, search box
//! input, Enter key, suggestion clicks) calls straight into it and hands the
//! returned data to whatever draws the map.

use crate::config::{AppConfig, MapConfig};
use crate::index::{CategoryCounts, EntityIndex};
use crate::search::SearchIndex;
use crate::types::{Category, FocusAction, IndexedEntity, RawEntity};
use crate::visibility::VisibilitySet;
use geo::Point;
use serde::Serialize;

/// One filter checkbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEntry {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub active: bool,
}

/// How one marker should currently be drawn.
#[derive(Debug, Clone, Copy)]
pub struct MarkerStyle<'a> {
    pub entity: &'a IndexedEntity,
    pub color: &'static str,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct MapSession {
    index: EntityIndex,
    visibility: VisibilitySet,
    map: MapConfig,
    max_suggestions: usize,
}

impl MapSession {
    pub fn new(raw: &[RawEntity], config: &AppConfig) -> Self {
        let index = EntityIndex::build(raw);
        tracing::info!(
            "Session ready: {} features, {} on the map",
            index.counts().total(),
            index.indexed().len()
        );

        MapSession {
            index,
            visibility: VisibilitySet::new(),
            map: config.map.clone(),
            max_suggestions: config.search.max_suggestions,
        }
    }

    pub fn counts(&self) -> &CategoryCounts {
        self.index.counts()
    }

    /// Initial camera position as (center, zoom).
    pub fn initial_view(&self) -> (Point<f64>, f64) {
        let [lon, lat] = self.map.center;
        (Point::new(lon, lat), self.map.zoom)
    }

    pub fn filters(&self) -> Vec<FilterEntry> {
        self.counts()
            .iter()
            .map(|(category, count)| FilterEntry {
                category,
                label: category.label(),
                color: category.color(),
                count,
                active: self.visibility.is_active(category),
            })
            .collect()
    }

    pub fn toggle(&mut self, category: Category) {
        self.visibility.toggle(category);
        tracing::debug!(?category, active = self.visibility.is_active(category), "Filter toggled");
    }

    pub fn set_active(&mut self, category: Category, active: bool) {
        self.visibility.set_active(category, active);
    }

    pub fn visible_entities(&self) -> Vec<&IndexedEntity> {
        self.visibility.filter(self.index.indexed()).collect()
    }

    /// Every indexed entity with its colour and current visibility.
    pub fn marker_styles(&self) -> Vec<MarkerStyle<'_>> {
        self.index
            .indexed()
            .iter()
            .map(|entity| MarkerStyle {
                entity,
                color: entity.category.color(),
                visible: self.visibility.is_visible(entity),
            })
            .collect()
    }

    pub fn suggest(&self, query: &str) -> Vec<&str> {
        self.search().suggest(query)
    }

    /// A suggestion was clicked.
    pub fn select(&self, suggestion: &str) -> Option<FocusAction> {
        self.search().resolve(suggestion).map(|e| self.focus_entity(e))
    }

    /// Enter was pressed with `text` in the search box.
    pub fn commit(&self, text: &str) -> Option<FocusAction> {
        let action = self.select(text);
        if action.is_none() {
            tracing::debug!("No entity named {:?}", text);
        }
        action
    }

    /// A marker was clicked.
    pub fn focus_entity(&self, entity: &IndexedEntity) -> FocusAction {
        FocusAction {
            center: entity.coordinates,
            zoom: self.map.focus_zoom,
            payload: entity.payload.clone(),
        }
    }

    fn search(&self) -> SearchIndex<'_> {
        SearchIndex::with_limit(&self.index, self.max_suggestions)
    }
}
