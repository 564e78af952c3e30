use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use triptailor_api::{
    config::AppConfig,
    db::{mongo::create_mongo_client, repository::MongoRepository},
    routes,
    services::{
        catalog::{ActivityCatalog, ItineraryStore},
        catalog_service::CatalogService,
        itinerary_service::ItineraryService,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    log::info!("Starting in {} mode", config.environment);

    let client = create_mongo_client(&config.mongo_uri, &config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let repository = MongoRepository::new(client.clone(), config.database.clone());
    let catalog: Arc<dyn ActivityCatalog> = Arc::new(repository.clone());
    let store: Arc<dyn ItineraryStore> = Arc::new(repository);
    let itinerary_service = web::Data::new(ItineraryService::new(catalog.clone(), store));
    let catalog_service = web::Data::new(CatalogService::new(catalog.clone()));
    let catalog_data: web::Data<dyn ActivityCatalog> = web::Data::from(catalog);

    let bind = (config.host.clone(), config.port);
    log::info!("Binding to {}:{}", bind.0, bind.1);

    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        let jwt_secret = config_data.jwt_secret.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .app_data(config_data.clone())
            .app_data(catalog_data.clone())
            .app_data(catalog_service.clone())
            .app_data(itinerary_service.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .configure(|cfg| routes::configure(cfg, &jwt_secret))
    })
    .bind(bind)?
    .run()
    .await
}
