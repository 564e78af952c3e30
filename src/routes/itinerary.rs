use actix_web::{web, HttpResponse};

use crate::error::ItineraryError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::{
    itinerary::{ItineraryUpdate, TripRequest},
    pagination::PageQuery,
};
use crate::services::itinerary_service::ItineraryService;

/*
    POST /api/itineraries/generate
*/
pub async fn generate(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    input: web::Json<TripRequest>,
) -> Result<HttpResponse, ItineraryError> {
    let itinerary = service.generate(&user.user_id, &input).await?;
    Ok(HttpResponse::Created().json(itinerary))
}

/*
    GET /api/itineraries
*/
pub async fn get_all(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ItineraryError> {
    let page = service.find_all(&user.user_id, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ItineraryError> {
    let itinerary = service.find_one(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

/*
    PATCH /api/itineraries/{id}
*/
pub async fn update(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
    input: web::Json<ItineraryUpdate>,
) -> Result<HttpResponse, ItineraryError> {
    let itinerary = service.update(&user.user_id, &path, &input).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn remove(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ItineraryError> {
    let confirmation = service.remove(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(confirmation))
}
