use std::env;

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "TripTailor";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
    pub jwt_secret: String,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if cfg!(debug_assertions) {
            dotenv::dotenv().ok();
        }

        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(PORT);
        let mongo_uri = env::var("MONGODB_URI").map_err(|_| ConfigError::Missing("MONGODB_URI"))?;
        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| DATABASE.to_string());
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            host,
            port,
            mongo_uri,
            database,
            jwt_secret,
            environment,
        })
    }
}
