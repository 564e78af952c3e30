use std::fmt;

use mongodb::bson::{doc, DateTime, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCategory {
    Gastronomy,
    Adventure,
    Culture,
    Nightlife,
    Relax,
}

impl ActivityCategory {
    /// Stored representation, as written to the `category` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Gastronomy => "GASTRONOMY",
            ActivityCategory::Adventure => "ADVENTURE",
            ActivityCategory::Culture => "CULTURE",
            ActivityCategory::Nightlife => "NIGHTLIFE",
            ActivityCategory::Relax => "RELAX",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_active() -> bool {
    true
}

/// Catalog document for a bookable activity in a city.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    pub city_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ActivityCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// The slice of an [`Activity`] the planner works with.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateActivity {
    pub id: String,
    pub category: ActivityCategory,
    pub tags: Vec<String>,
    pub approx_price: Option<f64>,
    pub duration_min: Option<u32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<Activity> for CandidateActivity {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            category: activity.category,
            tags: activity.tags,
            approx_price: activity.approx_price,
            duration_min: activity.duration_min,
            start_time: activity.start_time,
            end_time: activity.end_time,
        }
    }
}

/// Body of `POST /api/activities`.
#[derive(Debug, Deserialize, Clone)]
pub struct NewActivity {
    pub city_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ActivityCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub approx_price: Option<f64>,
    pub location: Option<String>,
    pub duration_min: Option<u32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl NewActivity {
    pub fn into_activity(self, id: String, now: DateTime) -> Activity {
        Activity {
            id,
            city_id: self.city_id,
            name: self.name,
            description: self.description,
            category: self.category,
            tags: self.tags,
            approx_price: self.approx_price,
            location: self.location,
            duration_min: self.duration_min,
            start_time: self.start_time,
            end_time: self.end_time,
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Partial update of an activity; `None` fields are left untouched.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ActivityUpdate {
    pub city_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ActivityCategory>,
    pub tags: Option<Vec<String>>,
    pub approx_price: Option<f64>,
    pub location: Option<String>,
    pub duration_min: Option<u32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

impl ActivityUpdate {
    pub fn is_empty(&self) -> bool {
        self.city_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.approx_price.is_none()
            && self.location.is_none()
            && self.duration_min.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.is_active.is_none()
    }

    pub fn apply(&self, activity: &mut Activity, now: DateTime) {
        if let Some(city_id) = &self.city_id {
            activity.city_id = city_id.clone();
        }
        if let Some(name) = &self.name {
            activity.name = name.clone();
        }
        if let Some(description) = &self.description {
            activity.description = description.clone();
        }
        if let Some(category) = self.category {
            activity.category = category;
        }
        if let Some(tags) = &self.tags {
            activity.tags = tags.clone();
        }
        if self.approx_price.is_some() {
            activity.approx_price = self.approx_price;
        }
        if self.location.is_some() {
            activity.location = self.location.clone();
        }
        if self.duration_min.is_some() {
            activity.duration_min = self.duration_min;
        }
        if self.start_time.is_some() {
            activity.start_time = self.start_time.clone();
        }
        if self.end_time.is_some() {
            activity.end_time = self.end_time.clone();
        }
        if let Some(is_active) = self.is_active {
            activity.is_active = is_active;
        }
        activity.updated_at = Some(now);
    }

    /// `$set` document for the provided fields, always touching `updated_at`.
    pub fn to_set_document(&self, now: DateTime) -> Document {
        let mut set = doc! { "updated_at": now };
        if let Some(city_id) = &self.city_id {
            set.insert("city_id", city_id.clone());
        }
        if let Some(name) = &self.name {
            set.insert("name", name.clone());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.clone());
        }
        if let Some(category) = self.category {
            set.insert("category", category.as_str());
        }
        if let Some(tags) = &self.tags {
            set.insert("tags", tags.clone());
        }
        if let Some(price) = self.approx_price {
            set.insert("approx_price", price);
        }
        if let Some(location) = &self.location {
            set.insert("location", location.clone());
        }
        if let Some(duration) = self.duration_min {
            set.insert("duration_min", i64::from(duration));
        }
        if let Some(start_time) = &self.start_time {
            set.insert("start_time", start_time.clone());
        }
        if let Some(end_time) = &self.end_time {
            set.insert("end_time", end_time.clone());
        }
        if let Some(is_active) = self.is_active {
            set.insert("is_active", is_active);
        }
        doc! { "$set": set }
    }
}

/// Query parameters for the public activity listing.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ActivityQuery {
    pub city_id: Option<String>,
    pub category: Option<ActivityCategory>,
    /// Comma separated list, any match qualifies.
    pub tags: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ActivityQuery {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
