use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub entities: PathBuf, // GeoJSON FeatureCollection
    #[serde(default)]
    pub properties: PropertyKeys,
}

/// Feature property names read from the feed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PropertyKeys {
    pub name: String,
    pub category: String,
    pub address: String,
    pub locality: String,
    pub contact_url: String,
    pub themes: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        PropertyKeys {
            name: "nombre_entidad".to_string(),
            category: "categoria".to_string(),
            address: "direccion".to_string(),
            locality: "localidad".to_string(),
            contact_url: "pagina_contacto".to_string(),
            themes: "tematica".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub center: [f64; 2], // [lon, lat]
    pub zoom: f64,
    pub focus_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: [-6.38, 39.39],
            zoom: 7.0,
            focus_zoom: 12.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { max_suggestions: 10 }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}
