use crate::config::PropertyKeys;
use crate::types::RawEntity;
use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// Read and parse the entity feed. This is the only asynchronous step; all
/// indexing happens after it resolves.
pub async fn load_entities(path: &Path, keys: &PropertyKeys) -> Result<Vec<RawEntity>> {
    tracing::info!("Loading entities from {:?}", path);
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read entity feed: {:?}", path))?;
    let entities = parse_feature_collection(&content, keys)
        .with_context(|| format!("Failed to parse entity feed: {:?}", path))?;
    tracing::info!("Loaded {} features", entities.len());
    Ok(entities)
}

/// Like [`load_entities`], but a failed fetch is logged and yields no entities.
pub async fn load_entities_or_empty(path: &Path, keys: &PropertyKeys) -> Vec<RawEntity> {
    match load_entities(path, keys).await {
        Ok(entities) => entities,
        Err(e) => {
            tracing::error!("Error loading {:?}: {:#}", path, e);
            Vec::new()
        }
    }
}

/// Parse a GeoJSON-shaped feature collection.
///
/// Only a root that is not a JSON object is an error. Each entry under
/// `features` becomes one [`RawEntity`] however malformed it is; a missing
/// `features` member reads as an empty feed.
pub fn parse_feature_collection(content: &str, keys: &PropertyKeys) -> Result<Vec<RawEntity>> {
    let root: JsonValue = serde_json::from_str(content).context("Invalid JSON")?;

    let root = match root {
        JsonValue::Object(obj) => obj,
        _ => return Err(anyhow!("Entity feed must be a JSON object")),
    };

    let entities = match root.get("features") {
        Some(JsonValue::Array(features)) => features.iter().map(|f| raw_entity(f, keys)).collect(),
        _ => Vec::new(),
    };

    Ok(entities)
}

fn raw_entity(feature: &JsonValue, keys: &PropertyKeys) -> RawEntity {
    let props = feature.get("properties").and_then(JsonValue::as_object);
    let text = |key: &str| props.and_then(|p| property_text(p, key));

    RawEntity {
        name: text(&keys.name),
        category: text(&keys.category),
        address: text(&keys.address),
        locality: text(&keys.locality),
        contact_url: text(&keys.contact_url),
        themes: props.map(|p| themes(p, &keys.themes)).unwrap_or_default(),
        coordinates: feature
            .get("geometry")
            .and_then(|g| g.get("coordinates"))
            .and_then(coordinate_pair),
    }
}

/// `[lon, lat, ...]` with two leading numbers; nested rings and lines don't qualify.
fn coordinate_pair(coords: &JsonValue) -> Option<(f64, f64)> {
    match coords.as_array()?.as_slice() {
        [lon, lat, ..] => Some((lon.as_f64()?, lat.as_f64()?)),
        _ => None,
    }
}

fn property_text(props: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match props.get(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn themes(props: &Map<String, JsonValue>, key: &str) -> Vec<String> {
    match props.get(key) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => property_text(props, key).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::EntityIndex;
    use crate::types::Category;
    use std::io::Write;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "categoria": "Impacto Social",
                    "nombre_entidad": "Cáritas Cáceres",
                    "direccion": "Calle Mayor 1",
                    "localidad": "Cáceres",
                    "pagina_contacto": "https://example.org",
                    "tematica": "Inclusión"
                },
                "geometry": { "type": "Point", "coordinates": [-6.37, 39.47] }
            },
            {
                "type": "Feature",
                "properties": { "categoria": "Ambiental", "tematica": ["agua", "bosques"], "localidad": 10003 },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] }
            }
        ]
    }"#;

    #[test]
    fn parses_properties_and_points() {
        let entities = parse_feature_collection(FEED, &PropertyKeys::default()).unwrap();
        assert_eq!(entities.len(), 3);

        let first = &entities[0];
        assert_eq!(first.name.as_deref(), Some("Cáritas Cáceres"));
        assert_eq!(first.category.as_deref(), Some("Impacto Social"));
        assert_eq!(first.contact_url.as_deref(), Some("https://example.org"));
        assert_eq!(first.themes, vec!["Inclusión".to_string()]);
        assert_eq!(first.coordinates, Some((-6.37, 39.47)));
    }

    #[test]
    fn missing_geometry_and_non_points_have_no_coordinates() {
        let entities = parse_feature_collection(FEED, &PropertyKeys::default()).unwrap();
        assert_eq!(entities[1].coordinates, None);
        assert_eq!(entities[1].themes, vec!["agua".to_string(), "bosques".to_string()]);
        assert_eq!(entities[1].locality.as_deref(), Some("10003"));
        assert_eq!(entities[2].coordinates, None);
        assert_eq!(entities[2], RawEntity::default());
    }

    #[test]
    fn custom_property_keys() {
        let feed = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"title":"Cooperativa"},
             "geometry":{"type":"Point","coordinates":[1.0,2.0]}}]}"#;
        let keys = PropertyKeys { name: "title".to_string(), ..PropertyKeys::default() };
        let entities = parse_feature_collection(feed, &keys).unwrap();
        assert_eq!(entities[0].name.as_deref(), Some("Cooperativa"));
    }

    #[test]
    fn rejects_roots_that_are_not_objects() {
        assert!(parse_feature_collection("[1, 2]", &PropertyKeys::default()).is_err());
        assert!(parse_feature_collection("not json", &PropertyKeys::default()).is_err());
    }

    #[test]
    fn object_without_features_is_an_empty_feed() {
        let point = r#"{"type":"Point","coordinates":[1.0,2.0]}"#;
        assert!(parse_feature_collection(point, &PropertyKeys::default()).unwrap().is_empty());
    }

    #[test]
    fn malformed_features_do_not_sink_the_feed() {
        let feed = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"nombre_entidad":"A","categoria":"Impacto Social"},
             "geometry":{"type":"Point","coordinates":[1.0,2.0]}},
            {"type":"Feature","properties":{"nombre_entidad":"B","categoria":"ambiental"}},
            {"type":"Feature","properties":{"nombre_entidad":"C","categoria":"economía"},
             "geometry":{"type":"Point","coordinates":[1.0]}},
            {"type":"Feature","properties":"oops","geometry":"nowhere"},
            42
        ]}"#;
        let entities = parse_feature_collection(feed, &PropertyKeys::default()).unwrap();
        assert_eq!(entities.len(), 5);
        assert_eq!(entities[1].name.as_deref(), Some("B"));
        assert_eq!(entities[1].coordinates, None);
        assert_eq!(entities[2].coordinates, None);
        assert_eq!(entities[3], RawEntity::default());
        assert_eq!(entities[4], RawEntity::default());

        let index = EntityIndex::build(&entities);
        assert_eq!(index.counts().get(Category::Social), 3);
        assert_eq!(index.counts().get(Category::Environmental), 1);
        assert_eq!(index.counts().get(Category::Economic), 1);
        assert_eq!(index.counts().total(), 5);

        let names: Vec<&str> = index.indexed().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A"]);
        assert!(index.by_key("b").is_none());
        assert!(index.by_key("c").is_none());
    }

    #[test]
    fn coordinates_need_two_leading_numbers() {
        let pair = |s: &str| coordinate_pair(&serde_json::from_str(s).unwrap());
        assert_eq!(pair("[-6.1, 39.2]"), Some((-6.1, 39.2)));
        assert_eq!(pair("[-6.1, 39.2, 400]"), Some((-6.1, 39.2)));
        assert_eq!(pair("[1.0]"), None);
        assert_eq!(pair("[]"), None);
        assert_eq!(pair(r#"["-6.1", "39.2"]"#), None);
        assert_eq!(pair("[[0, 0], [1, 1]]"), None);
        assert_eq!(pair("null"), None);
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.as_bytes()).unwrap();
        let entities = load_entities(file.path(), &PropertyKeys::default()).await.unwrap();
        assert_eq!(entities.len(), 3);
    }

    #[tokio::test]
    async fn failed_load_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("entidades.geojson");
        assert!(load_entities_or_empty(&missing, &PropertyKeys::default()).await.is_empty());

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(b"{ broken").unwrap();
        assert!(load_entities_or_empty(bad.path(), &PropertyKeys::default()).await.is_empty());
    }
}
