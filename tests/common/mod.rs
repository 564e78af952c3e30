#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::bson::{oid::ObjectId, DateTime};

use triptailor_api::error::StorageError;
use triptailor_api::middleware::auth::Claims;
use triptailor_api::models::{
    activity::{Activity, ActivityCategory, ActivityQuery, ActivityUpdate, CandidateActivity},
    city::City,
    itinerary::{Itinerary, ItineraryUpdate},
    pagination::{Page, PageQuery},
};
use triptailor_api::routes;
use triptailor_api::services::activity_filter::SelectionPredicate;
use triptailor_api::services::catalog::{
    ActivityCatalog, ItineraryStore, ACTIVITY_PAGE_LIMITS, ITINERARY_PAGE_LIMITS,
};
use triptailor_api::services::catalog_service::CatalogService;
use triptailor_api::services::itinerary_service::ItineraryService;

pub const TEST_SECRET: &str = "test_secret";
pub const CITY_ID: &str = "cusco-peru";

pub fn city(id: &str, name: &str) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        country: "Peru".to_string(),
        timezone: Some("America/Lima".to_string()),
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

pub fn activity(id: &str, category: ActivityCategory, tags: &[&str], price: Option<f64>) -> Activity {
    Activity {
        id: id.to_string(),
        city_id: CITY_ID.to_string(),
        name: format!("Activity {}", id),
        description: String::new(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        approx_price: price,
        location: None,
        duration_min: Some(90),
        start_time: None,
        end_time: None,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

/// `count` culture activities tagged "museo", ids `activity-0..count`.
pub fn culture_pool(count: usize) -> Vec<Activity> {
    (0..count)
        .map(|i| activity(&format!("activity-{}", i), ActivityCategory::Culture, &["museo"], Some(20.0)))
        .collect()
}

#[derive(Default)]
pub struct InMemoryCatalog {
    pub cities: Vec<City>,
    pub activities: Mutex<Vec<Activity>>,
    calls: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(cities: Vec<City>, activities: Vec<Activity>) -> Self {
        Self {
            cities,
            activities: Mutex::new(activities),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn activity(&self, id: &str) -> Option<Activity> {
        self.activities.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }
}

#[async_trait]
impl ActivityCatalog for InMemoryCatalog {
    async fn get_city(&self, city_id: &str) -> Result<Option<City>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.cities.iter().find(|c| c.id == city_id).cloned())
    }

    async fn find_activities(
        &self,
        predicate: &SelectionPredicate,
    ) -> Result<Vec<CandidateActivity>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter_map(|a| {
                let candidate = CandidateActivity::from(a.clone());
                predicate
                    .matches(&a.city_id, a.is_active, &candidate)
                    .then_some(candidate)
            })
            .collect())
    }

    async fn list_cities(&self, search: Option<&str>) -> Result<Vec<City>, StorageError> {
        let prefix = search.unwrap_or_default().to_lowercase();
        let mut cities: Vec<City> = self
            .cities
            .iter()
            .filter(|c| c.is_active && c.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    async fn list_activities(&self, query: &ActivityQuery) -> Result<Page<Activity>, StorageError> {
        let (default_limit, max_limit) = ACTIVITY_PAGE_LIMITS;
        let (page, limit) = PageQuery {
            page: query.page,
            limit: query.limit,
        }
        .resolve(default_limit, max_limit);
        let tags = query.tag_list();

        let matching: Vec<Activity> = self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.is_active)
            .filter(|a| query.city_id.as_ref().map_or(true, |c| &a.city_id == c))
            .filter(|a| query.category.map_or(true, |c| a.category == c))
            .filter(|a| tags.is_empty() || a.tags.iter().any(|t| tags.contains(t)))
            .filter(|a| {
                query
                    .min_price
                    .map_or(true, |min| a.approx_price.is_some_and(|p| p >= min))
            })
            .filter(|a| {
                query
                    .max_price
                    .map_or(true, |max| a.approx_price.is_some_and(|p| p <= max))
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let data = matching
            .into_iter()
            .skip(Page::<Activity>::skip(page, limit) as usize)
            .take(limit as usize)
            .collect();
        Ok(Page::new(data, total, page, limit))
    }

    async fn get_activity(&self, id: &str) -> Result<Option<Activity>, StorageError> {
        Ok(self.activity(id))
    }

    async fn count_active_activities(&self, city_id: &str) -> Result<u64, StorageError> {
        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.is_active && a.city_id == city_id)
            .count() as u64)
    }

    async fn create_activity(&self, activity: Activity) -> Result<Activity, StorageError> {
        self.activities.lock().unwrap().push(activity.clone());
        Ok(activity)
    }

    async fn update_activity(
        &self,
        id: &str,
        update: &ActivityUpdate,
    ) -> Result<Option<Activity>, StorageError> {
        let mut activities = self.activities.lock().unwrap();
        Ok(activities.iter_mut().find(|a| a.id == id).map(|activity| {
            update.apply(activity, DateTime::now());
            activity.clone()
        }))
    }

    async fn deactivate_activity(&self, id: &str) -> Result<Option<Activity>, StorageError> {
        let deactivate = ActivityUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        self.update_activity(id, &deactivate).await
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub itineraries: Mutex<Vec<Itinerary>>,
}

#[async_trait]
impl ItineraryStore for InMemoryStore {
    async fn insert(&self, mut itinerary: Itinerary) -> Result<Itinerary, StorageError> {
        itinerary.id = Some(ObjectId::new());
        self.itineraries.lock().unwrap().push(itinerary.clone());
        Ok(itinerary)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Itinerary>, StorageError> {
        Ok(self
            .itineraries
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == Some(id))
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        query: PageQuery,
    ) -> Result<Page<Itinerary>, StorageError> {
        let (default_limit, max_limit) = ITINERARY_PAGE_LIMITS;
        let (page, limit) = query.resolve(default_limit, max_limit);
        let owned: Vec<Itinerary> = self
            .itineraries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();

        let total = owned.len() as u64;
        let data = owned
            .into_iter()
            .skip(Page::<Itinerary>::skip(page, limit) as usize)
            .take(limit as usize)
            .collect();
        Ok(Page::new(data, total, page, limit))
    }

    async fn update(
        &self,
        id: ObjectId,
        update: &ItineraryUpdate,
    ) -> Result<Option<Itinerary>, StorageError> {
        let mut itineraries = self.itineraries.lock().unwrap();
        Ok(itineraries.iter_mut().find(|i| i.id == Some(id)).map(|itinerary| {
            update.apply(itinerary, Utc::now());
            itinerary.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StorageError> {
        let mut itineraries = self.itineraries.lock().unwrap();
        let before = itineraries.len();
        itineraries.retain(|i| i.id != Some(id));
        Ok(itineraries.len() < before)
    }
}

pub struct TestApp {
    pub catalog: Arc<InMemoryCatalog>,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalog::new(
                vec![city(CITY_ID, "Cusco"), city("lima-peru", "Lima")],
                activities,
            )),
            store: Arc::new(InMemoryStore::default()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let catalog: Arc<dyn ActivityCatalog> = self.catalog.clone();
        let store: Arc<dyn ItineraryStore> = self.store.clone();
        let service = web::Data::new(ItineraryService::new(catalog.clone(), store));
        let catalog_service = web::Data::new(CatalogService::new(catalog.clone()));
        let catalog_data: web::Data<dyn ActivityCatalog> = web::Data::from(catalog);

        App::new()
            .app_data(catalog_data)
            .app_data(catalog_service)
            .app_data(service)
            .configure(|cfg| routes::configure(cfg, TEST_SECRET))
    }
}

pub fn token_for(user_id: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: format!("{}@example.com", user_id),
        exp: (now + Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id: user_id.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

pub fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}
