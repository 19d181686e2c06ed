use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct InvoicingConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl InvoicingConfig {
    /// Common config via the shared loader, MongoDB connection details from
    /// the environment. In production both MongoDB variables must be set
    /// explicitly; in dev they fall back to a local instance.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(InvoicingConfig {
            common,
            mongodb: MongoConfig {
                uri: require_env("MONGODB_URI", "mongodb://localhost:27017", is_prod)?,
                database: require_env("MONGODB_DATABASE", "invoice_db", is_prod)?,
            },
        })
    }
}

fn require_env(key: &str, dev_default: &str, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Err(_) => Ok(dev_default.to_string()),
    }
}
