use async_trait::async_trait;
use futures::TryStreamExt;
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, DateTime, Document},
    options::ReturnDocument,
    Client, Collection,
};
use std::sync::Arc;

use crate::error::StorageError;
use crate::models::{
    activity::{Activity, ActivityQuery, ActivityUpdate, CandidateActivity},
    city::City,
    itinerary::{Itinerary, ItineraryUpdate},
    pagination::{Page, PageQuery},
};
use crate::services::activity_filter::SelectionPredicate;
use crate::services::catalog::{
    ActivityCatalog, ItineraryStore, ACTIVITY_PAGE_LIMITS, ITINERARY_PAGE_LIMITS,
};

const CITY_COLLECTION: &str = "City";
const ACTIVITY_COLLECTION: &str = "Activity";
const ITINERARY_COLLECTION: &str = "Itinerary";

/// MongoDB-backed catalog and itinerary store.
#[derive(Clone)]
pub struct MongoRepository {
    client: Arc<Client>,
    database: String,
}

impl MongoRepository {
    pub fn new(client: Arc<Client>, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn cities(&self) -> Collection<City> {
        self.client.database(&self.database).collection(CITY_COLLECTION)
    }

    fn activities(&self) -> Collection<Activity> {
        self.client
            .database(&self.database)
            .collection(ACTIVITY_COLLECTION)
    }

    fn itineraries(&self) -> Collection<Itinerary> {
        self.client
            .database(&self.database)
            .collection(ITINERARY_COLLECTION)
    }
}

fn activity_listing_filter(query: &ActivityQuery) -> Document {
    let mut filter = doc! { "is_active": true };

    if let Some(city_id) = &query.city_id {
        filter.insert("city_id", city_id.clone());
    }
    if let Some(category) = query.category {
        filter.insert("category", category.as_str());
    }

    let tags = query.tag_list();
    if !tags.is_empty() {
        filter.insert("tags", doc! { "$in": tags });
    }

    let mut price = Document::new();
    if let Some(min) = query.min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = query.max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        filter.insert("approx_price", price);
    }

    filter
}

#[async_trait]
impl ActivityCatalog for MongoRepository {
    async fn get_city(&self, city_id: &str) -> Result<Option<City>, StorageError> {
        Ok(self.cities().find_one(doc! { "_id": city_id }).await?)
    }

    async fn find_activities(
        &self,
        predicate: &SelectionPredicate,
    ) -> Result<Vec<CandidateActivity>, StorageError> {
        let filter = predicate.to_document();
        log::debug!("Activity filter: {:?}", filter);

        let cursor = self
            .activities()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?;
        let activities: Vec<Activity> = cursor.try_collect().await?;

        Ok(activities.into_iter().map(CandidateActivity::from).collect())
    }

    async fn list_cities(&self, search: Option<&str>) -> Result<Vec<City>, StorageError> {
        let mut filter = doc! { "is_active": true };
        if let Some(search_text) = search.filter(|s| !s.is_empty()) {
            filter.insert(
                "name",
                doc! {
                    "$regex": format!("^{}", regex::escape(search_text)),
                    "$options": "i"
                },
            );
        }

        let cursor = self
            .cities()
            .find(filter)
            .sort(doc! { "name": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_activities(&self, query: &ActivityQuery) -> Result<Page<Activity>, StorageError> {
        let (default_limit, max_limit) = ACTIVITY_PAGE_LIMITS;
        let (page, limit) = PageQuery {
            page: query.page,
            limit: query.limit,
        }
        .resolve(default_limit, max_limit);

        let filter = activity_listing_filter(query);
        let total = self.activities().count_documents(filter.clone()).await?;
        let cursor = self
            .activities()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(Page::<Activity>::skip(page, limit))
            .limit(limit as i64)
            .await?;
        let data: Vec<Activity> = cursor.try_collect().await?;

        Ok(Page::new(data, total, page, limit))
    }

    async fn get_activity(&self, id: &str) -> Result<Option<Activity>, StorageError> {
        Ok(self.activities().find_one(doc! { "_id": id }).await?)
    }

    async fn count_active_activities(&self, city_id: &str) -> Result<u64, StorageError> {
        Ok(self
            .activities()
            .count_documents(doc! { "city_id": city_id, "is_active": true })
            .await?)
    }

    async fn create_activity(&self, activity: Activity) -> Result<Activity, StorageError> {
        self.activities().insert_one(&activity).await?;
        Ok(activity)
    }

    async fn update_activity(
        &self,
        id: &str,
        update: &ActivityUpdate,
    ) -> Result<Option<Activity>, StorageError> {
        Ok(self
            .activities()
            .find_one_and_update(doc! { "_id": id }, update.to_set_document(DateTime::now()))
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn deactivate_activity(&self, id: &str) -> Result<Option<Activity>, StorageError> {
        Ok(self
            .activities()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "is_active": false, "updated_at": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }
}

#[async_trait]
impl ItineraryStore for MongoRepository {
    async fn insert(&self, mut itinerary: Itinerary) -> Result<Itinerary, StorageError> {
        let result = self.itineraries().insert_one(&itinerary).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => itinerary.id = Some(id),
            other => {
                return Err(StorageError::Other(format!(
                    "unexpected inserted id {:?}",
                    other
                )))
            }
        }
        Ok(itinerary)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Itinerary>, StorageError> {
        Ok(self.itineraries().find_one(doc! { "_id": id }).await?)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        query: PageQuery,
    ) -> Result<Page<Itinerary>, StorageError> {
        let (default_limit, max_limit) = ITINERARY_PAGE_LIMITS;
        let (page, limit) = query.resolve(default_limit, max_limit);

        let filter = doc! { "user_id": user_id };
        let total = self.itineraries().count_documents(filter.clone()).await?;
        let cursor = self
            .itineraries()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(Page::<Itinerary>::skip(page, limit))
            .limit(limit as i64)
            .await?;
        let data: Vec<Itinerary> = cursor.try_collect().await?;

        Ok(Page::new(data, total, page, limit))
    }

    async fn update(
        &self,
        id: ObjectId,
        update: &ItineraryUpdate,
    ) -> Result<Option<Itinerary>, StorageError> {
        Ok(self
            .itineraries()
            .find_one_and_update(doc! { "_id": id }, update.to_set_document(Utc::now()))
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StorageError> {
        let result = self.itineraries().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
