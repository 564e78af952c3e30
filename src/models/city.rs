use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct City {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

fn default_active() -> bool {
    true
}

/// A city together with the number of its active activities.
#[derive(Debug, Serialize)]
pub struct CityDetail {
    #[serde(flatten)]
    pub city: City,
    pub activity_count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CitySummary {
    pub id: String,
    pub name: String,
    pub country: String,
}

impl From<&City> for CitySummary {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.clone(),
            name: city.name.clone(),
            country: city.country.clone(),
        }
    }
}
