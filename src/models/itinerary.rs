use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::{
    self, doc, oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime, Document,
};
use serde::{Deserialize, Serialize};

use crate::models::city::CitySummary;

/// Caller input for a generated itinerary.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRequest {
    pub city_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_approx: Option<f64>,
}

impl TripRequest {
    /// Shape checks that belong to the transport layer; date rules are
    /// enforced by the planner.
    pub fn validate(&self) -> Result<(), String> {
        if self.city_id.trim().is_empty() {
            return Err("city_id must not be empty".to_string());
        }
        if self.interests.is_empty() {
            return Err("interests must contain at least one entry".to_string());
        }
        if let Some(budget) = self.budget_approx {
            if !budget.is_finite() || budget < 0.0 {
                return Err("budget_approx must be a non-negative number".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ActivityAssignment {
    pub activity_id: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day_number: u32,
    pub date: NaiveDate,
    pub activities: Vec<ActivityAssignment>,
}

/// Output of the planner. Owns no storage; the caller persists it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryPlan {
    pub city: CitySummary,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub day_count: u32,
    pub days: Vec<DayPlan>,
}

impl ItineraryPlan {
    pub fn activity_ids(&self) -> impl Iterator<Item = &str> {
        self.days
            .iter()
            .flat_map(|day| day.activities.iter().map(|a| a.activity_id.as_str()))
    }
}

/// Persisted itinerary document.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub city: CitySummary,
    pub title: String,
    pub description: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end_date: DateTime<Utc>,
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_approx: Option<f64>,
    pub day_count: u32,
    pub days: Vec<DayPlan>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ItineraryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl ItineraryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.interests.is_none()
    }

    pub fn apply(&self, itinerary: &mut Itinerary, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            itinerary.title = title.clone();
        }
        if let Some(description) = &self.description {
            itinerary.description = description.clone();
        }
        if let Some(interests) = &self.interests {
            itinerary.interests = interests.clone();
        }
        itinerary.updated_at = now;
    }

    /// `$set` document for the provided fields, always touching `updated_at`.
    pub fn to_set_document(&self, now: DateTime<Utc>) -> Document {
        let mut set = doc! { "updated_at": bson::DateTime::from_chrono(now) };
        if let Some(title) = &self.title {
            set.insert("title", title.clone());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.clone());
        }
        if let Some(interests) = &self.interests {
            set.insert("interests", interests.clone());
        }
        doc! { "$set": set }
    }
}
