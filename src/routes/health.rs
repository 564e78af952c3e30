use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::mongo::ping;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    client: web::Data<Arc<Client>>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mongo = match ping(&client, &config.database).await {
        Ok(()) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Connected to database {}", config.database)),
        },
        Err(e) => {
            log::error!("MongoDB health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    };

    let status = if mongo.status == "ok" { "ok" } else { "degraded" };
    let mut services = HashMap::new();
    services.insert("mongodb".to_string(), mongo);

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
