use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::error::ItineraryError;
use crate::models::{
    activity::{Activity, ActivityUpdate, NewActivity},
    city::CityDetail,
};
use crate::services::catalog::ActivityCatalog;
use crate::services::time_slot::parse_time;

/// City lookups and activity maintenance on top of an [`ActivityCatalog`].
pub struct CatalogService {
    catalog: Arc<dyn ActivityCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn ActivityCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn city_detail(&self, city_id: &str) -> Result<CityDetail, ItineraryError> {
        let city = self
            .catalog
            .get_city(city_id)
            .await?
            .ok_or_else(|| city_not_found(city_id))?;
        let activity_count = self.catalog.count_active_activities(city_id).await?;

        Ok(CityDetail {
            city,
            activity_count,
        })
    }

    pub async fn find_activity(&self, id: &str) -> Result<Activity, ItineraryError> {
        self.catalog
            .get_activity(id)
            .await?
            .ok_or_else(|| activity_not_found(id))
    }

    pub async fn create_activity(&self, input: NewActivity) -> Result<Activity, ItineraryError> {
        if input.name.trim().is_empty() {
            return Err(ItineraryError::InvalidRequest(
                "name must not be empty".to_string(),
            ));
        }
        check_fields(
            input.approx_price,
            input.duration_min,
            input.start_time.as_deref(),
            input.end_time.as_deref(),
        )?;
        self.ensure_city(&input.city_id).await?;

        let activity = input.into_activity(ObjectId::new().to_hex(), DateTime::now());
        let created = self.catalog.create_activity(activity).await?;
        log::info!("Created activity {} in {}", created.id, created.city_id);
        Ok(created)
    }

    pub async fn update_activity(
        &self,
        id: &str,
        update: &ActivityUpdate,
    ) -> Result<Activity, ItineraryError> {
        if update.is_empty() {
            return self.find_activity(id).await;
        }
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ItineraryError::InvalidRequest(
                "name must not be empty".to_string(),
            ));
        }
        check_fields(
            update.approx_price,
            update.duration_min,
            update.start_time.as_deref(),
            update.end_time.as_deref(),
        )?;
        if let Some(city_id) = &update.city_id {
            self.ensure_city(city_id).await?;
        }

        self.catalog
            .update_activity(id, update)
            .await?
            .ok_or_else(|| activity_not_found(id))
    }

    pub async fn deactivate_activity(&self, id: &str) -> Result<Activity, ItineraryError> {
        let activity = self
            .catalog
            .deactivate_activity(id)
            .await?
            .ok_or_else(|| activity_not_found(id))?;
        log::info!("Deactivated activity {}", id);
        Ok(activity)
    }

    async fn ensure_city(&self, city_id: &str) -> Result<(), ItineraryError> {
        match self.catalog.get_city(city_id).await? {
            Some(_) => Ok(()),
            None => Err(city_not_found(city_id)),
        }
    }
}

fn check_fields(
    approx_price: Option<f64>,
    duration_min: Option<u32>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(), ItineraryError> {
    if approx_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(ItineraryError::InvalidRequest(
            "approx_price must be a non-negative number".to_string(),
        ));
    }
    if duration_min == Some(0) {
        return Err(ItineraryError::InvalidRequest(
            "duration_min must be positive".to_string(),
        ));
    }
    for (field, value) in [("start_time", start_time), ("end_time", end_time)] {
        if value.is_some_and(|t| parse_time(t).is_none()) {
            return Err(ItineraryError::InvalidRequest(format!(
                "{} must use the HH:MM format",
                field
            )));
        }
    }
    Ok(())
}

fn city_not_found(id: &str) -> ItineraryError {
    ItineraryError::NotFound(format!("City with id {} not found", id))
}

fn activity_not_found(id: &str) -> ItineraryError {
    ItineraryError::NotFound(format!("Activity with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fields_accepts_optional_values() {
        assert!(check_fields(None, None, None, None).is_ok());
        assert!(check_fields(Some(0.0), Some(45), Some("08:30"), Some("18:00")).is_ok());
    }

    #[test]
    fn test_check_fields_rejects_bad_values() {
        assert!(check_fields(Some(-5.0), None, None, None).is_err());
        assert!(check_fields(None, Some(0), None, None).is_err());

        let err = check_fields(None, None, None, Some("6pm")).unwrap_err();
        assert!(err.to_string().contains("end_time"));
    }
}
