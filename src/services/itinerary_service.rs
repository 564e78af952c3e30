use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::error::ItineraryError;
use crate::models::{
    itinerary::{Itinerary, ItineraryPlan, ItineraryUpdate, TripRequest},
    pagination::{Page, PageQuery},
};
use crate::services::catalog::{ActivityCatalog, ItineraryStore};
use crate::services::itinerary_generation_service::ItineraryGenerator;

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Ties plan generation to itinerary storage and enforces ownership.
pub struct ItineraryService {
    generator: ItineraryGenerator,
    store: Arc<dyn ItineraryStore>,
}

impl ItineraryService {
    pub fn new(catalog: Arc<dyn ActivityCatalog>, store: Arc<dyn ItineraryStore>) -> Self {
        Self {
            generator: ItineraryGenerator::new(catalog),
            store,
        }
    }

    pub async fn generate(
        &self,
        user_id: &str,
        request: &TripRequest,
    ) -> Result<Itinerary, ItineraryError> {
        request
            .validate()
            .map_err(ItineraryError::InvalidRequest)?;

        let plan = self.generator.generate_itinerary(request).await?;
        let itinerary = build_itinerary(user_id, request, plan);
        let stored = self.store.insert(itinerary).await?;

        log::info!(
            "Generated itinerary {} for user {} ({} days)",
            stored.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id,
            stored.day_count
        );
        Ok(stored)
    }

    pub async fn find_all(
        &self,
        user_id: &str,
        query: PageQuery,
    ) -> Result<Page<Itinerary>, ItineraryError> {
        Ok(self.store.list_for_user(user_id, query).await?)
    }

    pub async fn find_one(&self, user_id: &str, id: &str) -> Result<Itinerary, ItineraryError> {
        let (_, itinerary) = self.owned(user_id, id, "access").await?;
        Ok(itinerary)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        update: &ItineraryUpdate,
    ) -> Result<Itinerary, ItineraryError> {
        let (object_id, current) = self.owned(user_id, id, "update").await?;
        if update.is_empty() {
            return Ok(current);
        }

        self.store
            .update(object_id, update)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, user_id: &str, id: &str) -> Result<DeleteConfirmation, ItineraryError> {
        let (object_id, _) = self.owned(user_id, id, "delete").await?;
        if !self.store.delete(object_id).await? {
            return Err(not_found(id));
        }

        Ok(DeleteConfirmation {
            message: "Itinerary deleted".to_string(),
        })
    }

    async fn owned(
        &self,
        user_id: &str,
        id: &str,
        action: &str,
    ) -> Result<(ObjectId, Itinerary), ItineraryError> {
        let object_id = ObjectId::parse_str(id).map_err(|_| not_found(id))?;
        let itinerary = self
            .store
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if itinerary.user_id != user_id {
            return Err(ItineraryError::Forbidden(format!(
                "You do not have permission to {} this itinerary",
                action
            )));
        }

        Ok((object_id, itinerary))
    }
}

fn not_found(id: &str) -> ItineraryError {
    ItineraryError::NotFound(format!("Itinerary with id {} not found", id))
}

pub fn build_itinerary(user_id: &str, request: &TripRequest, plan: ItineraryPlan) -> Itinerary {
    let now = Utc::now();
    let title = format!(
        "Itinerary {} - {}",
        plan.city.name,
        plan.start_date.format("%Y-%m-%d")
    );
    let description = format!(
        "Itinerary generated for {} days in {}",
        plan.day_count, plan.city.name
    );

    Itinerary {
        id: None,
        user_id: user_id.to_string(),
        city: plan.city,
        title,
        description,
        start_date: plan.start_date,
        end_date: plan.end_date,
        interests: request.interests.clone(),
        budget_approx: request.budget_approx,
        day_count: plan.day_count,
        days: plan.days,
        created_at: now,
        updated_at: now,
    }
}
