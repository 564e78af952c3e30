use crate::error::ItineraryError;
use crate::models::{
    activity::CandidateActivity,
    city::CitySummary,
    itinerary::{ActivityAssignment, DayPlan, ItineraryPlan, TripRequest},
};
use crate::services::activity_filter::build_predicate;
use crate::services::catalog::ActivityCatalog;
use crate::services::day_allocator::{allocate, per_day_cap, MAX_ACTIVITIES_PER_DAY};
use crate::services::time_slot::{resolve_end_time, DEFAULT_START_TIME};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

pub const MAX_TRIP_DAYS: u32 = 14;

/// Checks the date range and returns the number of calendar days it covers.
///
/// Time of day is ignored for the day count: 1 June 18:00 to 3 June 08:00 is
/// three days.
pub fn validate_trip_dates(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<u32, ItineraryError> {
    if start_date > end_date {
        return Err(ItineraryError::InvalidRange);
    }
    if start_date < now {
        return Err(ItineraryError::PastDate);
    }

    let days = (end_date.date_naive() - start_date.date_naive()).num_days() + 1;
    if days > i64::from(MAX_TRIP_DAYS) {
        return Err(ItineraryError::RangeTooLong {
            days,
            max: MAX_TRIP_DAYS,
        });
    }

    Ok(days as u32)
}

pub struct ItineraryGenerator {
    catalog: Arc<dyn ActivityCatalog>,
}

impl ItineraryGenerator {
    pub fn new(catalog: Arc<dyn ActivityCatalog>) -> Self {
        Self { catalog }
    }

    /// Generate an itinerary plan for `request`, starting from the current time.
    pub async fn generate_itinerary(
        &self,
        request: &TripRequest,
    ) -> Result<ItineraryPlan, ItineraryError> {
        let mut rng = StdRng::from_entropy();
        self.generate_itinerary_with(request, Utc::now(), &mut rng)
            .await
    }

    /// Same as [`generate_itinerary`](Self::generate_itinerary) with an explicit
    /// clock and random source. `rng` only affects the order within a day.
    pub async fn generate_itinerary_with<R>(
        &self,
        request: &TripRequest,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<ItineraryPlan, ItineraryError>
    where
        R: Rng + ?Sized,
    {
        let day_count = validate_trip_dates(request.start_date, request.end_date, now)?;
        log::debug!("Trip to {} spans {} days", request.city_id, day_count);

        let city = self
            .catalog
            .get_city(&request.city_id)
            .await?
            .ok_or_else(|| {
                ItineraryError::NotFound(format!("City with id {} not found", request.city_id))
            })?;

        let predicate = build_predicate(
            &request.city_id,
            &request.interests,
            request.budget_approx,
            day_count,
        );
        let pool = self.catalog.find_activities(&predicate).await?;
        if pool.is_empty() {
            return Err(ItineraryError::NotFound(
                "No activities match the requested interests".to_string(),
            ));
        }
        log::debug!(
            "Fetched {} candidate activities, {} per day",
            pool.len(),
            per_day_cap(pool.len(), day_count)
        );

        let days = allocate(&pool, day_count, rng)
            .into_iter()
            .enumerate()
            .map(|(index, activities)| {
                debug_assert!(activities.len() <= MAX_ACTIVITIES_PER_DAY);
                DayPlan {
                    day_number: index as u32 + 1,
                    date: request.start_date.date_naive() + Duration::days(index as i64),
                    activities: activities
                        .into_iter()
                        .map(assign)
                        .collect(),
                }
            })
            .collect();

        Ok(ItineraryPlan {
            city: CitySummary::from(&city),
            start_date: request.start_date,
            end_date: request.end_date,
            day_count,
            days,
        })
    }

}

fn assign(activity: &CandidateActivity) -> ActivityAssignment {
    let start_time = activity
        .start_time
        .clone()
        .unwrap_or_else(|| DEFAULT_START_TIME.to_string());
    let end_time = resolve_end_time(
        &start_time,
        activity.duration_min,
        activity.end_time.as_deref(),
    );

    ActivityAssignment {
        activity_id: activity.id.clone(),
        start_time,
        end_time,
    }
}
