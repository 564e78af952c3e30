use actix_web::{web, HttpResponse};

use crate::error::ItineraryError;
use crate::models::activity::{ActivityQuery, ActivityUpdate, NewActivity};
use crate::services::catalog::ActivityCatalog;
use crate::services::catalog_service::CatalogService;

/*
    GET /api/activities
*/
pub async fn get_activities(
    catalog: web::Data<dyn ActivityCatalog>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, ItineraryError> {
    let page = catalog.list_activities(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/*
    GET /api/activities/{id}
*/
pub async fn get_by_id(
    service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ItineraryError> {
    let activity = service.find_activity(&path).await?;
    Ok(HttpResponse::Ok().json(activity))
}

/*
    POST /api/activities
*/
pub async fn create(
    service: web::Data<CatalogService>,
    input: web::Json<NewActivity>,
) -> Result<HttpResponse, ItineraryError> {
    let activity = service.create_activity(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(activity))
}

/*
    PATCH /api/activities/{id}
*/
pub async fn update(
    service: web::Data<CatalogService>,
    path: web::Path<String>,
    input: web::Json<ActivityUpdate>,
) -> Result<HttpResponse, ItineraryError> {
    let activity = service.update_activity(&path, &input).await?;
    Ok(HttpResponse::Ok().json(activity))
}

/*
    DELETE /api/activities/{id}
*/
pub async fn remove(
    service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ItineraryError> {
    let activity = service.deactivate_activity(&path).await?;
    Ok(HttpResponse::Ok().json(activity))
}
