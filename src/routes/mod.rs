use actix_web::{guard, web};

use crate::middleware::auth::AuthMiddleware;

pub mod activity;
pub mod city;
pub mod health;
pub mod itinerary;

/// Registers the `/api` routes. Callers provide the app data: a
/// `web::Data<dyn ActivityCatalog>`, a `web::Data<CatalogService>` and a
/// `web::Data<ItineraryService>`.
pub fn configure(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/cities", web::get().to(city::get_cities))
            .route("/cities/{id}", web::get().to(city::get_by_id))
            .service(
                web::resource("/activities")
                    .guard(guard::Get())
                    .route(web::get().to(activity::get_activities)),
            )
            .service(
                web::resource("/activities/{id}")
                    .guard(guard::Get())
                    .route(web::get().to(activity::get_by_id)),
            )
            // Protected routes; reads on the same paths are matched above
            .service(
                web::resource("/activities")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route(web::post().to(activity::create)),
            )
            .service(
                web::resource("/activities/{id}")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route(web::patch().to(activity::update))
                    .route(web::delete().to(activity::remove)),
            )
            .service(
                web::scope("/itineraries")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route("/generate", web::post().to(itinerary::generate))
                    .route("", web::get().to(itinerary::get_all))
                    .route("/{id}", web::get().to(itinerary::get_by_id))
                    .route("/{id}", web::patch().to(itinerary::update))
                    .route("/{id}", web::delete().to(itinerary::remove)),
            ),
    );
}
