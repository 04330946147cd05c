use geo::Point;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fixed classification buckets for mapped entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Social,
    Environmental,
    Economic,
}

impl Category {
    /// Order used for filter rendering and count reporting.
    pub const ALL: [Category; 3] = [Category::Social, Category::Environmental, Category::Economic];

    pub fn label(self) -> &'static str {
        match self {
            Category::Social => "SOCIALES",
            Category::Environmental => "AMBIENTALES",
            Category::Economic => "ECONÓMICAS",
        }
    }

    /// Marker fill colour as a hex code.
    pub fn color(self) -> &'static str {
        match self {
            Category::Social => "#FFD700",
            Category::Environmental => "#009b4d",
            Category::Economic => "#FF7F00",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOCIAL" => Ok(Category::Social),
            "ENVIRONMENTAL" => Ok(Category::Environmental),
            "ECONOMIC" => Ok(Category::Economic),
            other => Err(anyhow::anyhow!(
                "Unknown category '{}' (expected social, environmental or economic)",
                other
            )),
        }
    }
}

/// One feature from the input feed, before categorization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntity {
    pub name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub contact_url: Option<String>,
    pub themes: Vec<String>,
    /// (longitude, latitude)
    pub coordinates: Option<(f64, f64)>,
}

/// Fields shown in an entity's popup. Absent text is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPayload {
    pub name: String,
    pub category_label: String,
    pub address: String,
    pub locality: String,
    pub contact_url: Option<String>,
    pub themes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntity {
    pub name: String,
    pub category: Category,
    /// x = longitude, y = latitude
    pub coordinates: Point<f64>,
    pub payload: DisplayPayload,
}

impl IndexedEntity {
    pub fn from_raw(raw: &RawEntity, category: Category, (lon, lat): (f64, f64)) -> Self {
        let name = raw.name.clone().unwrap_or_default();
        let payload = DisplayPayload {
            name: name.clone(),
            category_label: category.label().to_string(),
            address: raw.address.clone().unwrap_or_default(),
            locality: raw.locality.clone().unwrap_or_default(),
            contact_url: raw.contact_url.clone().filter(|url| !url.is_empty()),
            themes: raw.themes.join(", "),
        };

        IndexedEntity {
            name,
            category,
            coordinates: Point::new(lon, lat),
            payload,
        }
    }
}

/// Camera + popup instruction handed to the map collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusAction {
    #[serde(serialize_with = "lon_lat")]
    pub center: Point<f64>,
    pub zoom: f64,
    pub payload: DisplayPayload,
}

fn lon_lat<S: Serializer>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    [point.x(), point.y()].serialize(serializer)
}
