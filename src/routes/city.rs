use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ItineraryError;
use crate::services::catalog::ActivityCatalog;
use crate::services::catalog_service::CatalogService;

#[derive(Deserialize)]
pub struct QueryParams {
    search: Option<String>,
}

/*
    GET /api/cities
*/
pub async fn get_cities(
    catalog: web::Data<dyn ActivityCatalog>,
    params: web::Query<QueryParams>,
) -> Result<HttpResponse, ItineraryError> {
    let cities = catalog.list_cities(params.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(cities))
}

/*
    GET /api/cities/{id}
*/
pub async fn get_by_id(
    service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ItineraryError> {
    let city = service.city_detail(&path).await?;
    Ok(HttpResponse::Ok().json(city))
}
