use crate::domain::error::{FinderError, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

// 餐厅存储记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "time_of_day")]
    pub opens_at: NaiveTime,
    #[serde(with = "time_of_day")]
    pub closes_at: NaiveTime,
    #[serde(default)]
    pub attributes: Vec<String>, // 菜系
}

// 菜单记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub restaurant_id: String,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub attributes: Vec<String>, // 如 spicy, sweet
}

impl MenuRecord {
    pub fn empty(restaurant_id: &str) -> Self {
        Self {
            restaurant_id: restaurant_id.to_string(),
            items: Vec::new(),
        }
    }
}

/// Restaurant projection handed back to callers and stored in the search cache.
///
/// Equality and hashing look at `restaurant_id` only, so two results for the
/// same restaurant collapse into one entry wherever results are de-duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub restaurant_id: String,
    pub name: String,
    pub city: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "time_of_day")]
    pub opens_at: NaiveTime,
    #[serde(with = "time_of_day")]
    pub closes_at: NaiveTime,
    pub attributes: Vec<String>,
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.restaurant_id == other.restaurant_id
    }
}

impl Eq for SearchResult {}

impl Hash for SearchResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.restaurant_id.hash(state);
    }
}

impl From<&RestaurantRecord> for SearchResult {
    fn from(record: &RestaurantRecord) -> Self {
        Self {
            restaurant_id: record.restaurant_id.clone(),
            name: record.name.clone(),
            city: record.city.clone(),
            image_url: record.image_url.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            opens_at: record.opens_at,
            closes_at: record.closes_at,
            attributes: record.attributes.clone(),
        }
    }
}

// 搜索请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub search_for: Option<String>,
}

impl SearchRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            search_for: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.search_for = Some(query.into());
        self
    }

    /// Reject coordinates outside -90..=90 / -180..=180.
    pub fn validate(&self) -> Result<()> {
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(FinderError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub restaurants: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn new(restaurants: Vec<SearchResult>) -> Self {
        Self { restaurants }
    }
}

/// Time-of-day as `HH:MM:SS`; `HH:MM` is accepted on input.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(s, FORMAT).or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
    }

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}
