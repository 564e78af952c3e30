use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::StorageError;
use crate::models::{
    activity::{Activity, ActivityQuery, ActivityUpdate, CandidateActivity},
    city::City,
    itinerary::{Itinerary, ItineraryUpdate},
    pagination::{Page, PageQuery},
};
use crate::services::activity_filter::SelectionPredicate;

/// Access to cities and the activity catalog.
#[async_trait]
pub trait ActivityCatalog: Send + Sync {
    async fn get_city(&self, city_id: &str) -> Result<Option<City>, StorageError>;

    /// Activities satisfying `predicate`, newest first.
    async fn find_activities(
        &self,
        predicate: &SelectionPredicate,
    ) -> Result<Vec<CandidateActivity>, StorageError>;

    /// Active cities ordered by name, optionally restricted to names starting
    /// with `search` (case-insensitive).
    async fn list_cities(&self, search: Option<&str>) -> Result<Vec<City>, StorageError>;

    async fn list_activities(&self, query: &ActivityQuery) -> Result<Page<Activity>, StorageError>;

    /// Looks up an activity regardless of its active flag.
    async fn get_activity(&self, id: &str) -> Result<Option<Activity>, StorageError>;

    async fn count_active_activities(&self, city_id: &str) -> Result<u64, StorageError>;

    async fn create_activity(&self, activity: Activity) -> Result<Activity, StorageError>;

    /// Applies `update` and returns the stored activity, or `None` if absent.
    async fn update_activity(
        &self,
        id: &str,
        update: &ActivityUpdate,
    ) -> Result<Option<Activity>, StorageError>;

    /// Soft delete: clears `is_active` and keeps the document.
    async fn deactivate_activity(&self, id: &str) -> Result<Option<Activity>, StorageError>;
}

/// Durable storage for generated itineraries.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Stores the itinerary and returns it with its assigned id.
    async fn insert(&self, itinerary: Itinerary) -> Result<Itinerary, StorageError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Itinerary>, StorageError>;

    async fn list_for_user(
        &self,
        user_id: &str,
        query: PageQuery,
    ) -> Result<Page<Itinerary>, StorageError>;

    async fn update(
        &self,
        id: ObjectId,
        update: &ItineraryUpdate,
    ) -> Result<Option<Itinerary>, StorageError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, StorageError>;
}

// (default, max) page sizes
pub const ACTIVITY_PAGE_LIMITS: (u64, u64) = (20, 100);
pub const ITINERARY_PAGE_LIMITS: (u64, u64) = (10, 50);
