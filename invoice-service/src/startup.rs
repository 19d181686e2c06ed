//! Application wiring: configuration to connected services.

use crate::config::InvoicingConfig;
use crate::services::{self, InvoiceService, MongoDb, SettingsService};
use service_core::error::AppError;

/// A fully wired invoicing backend. Transport layers (HTTP/gRPC) sit on top
/// of this and are out of scope here; embedders call the services directly.
pub struct Application {
    pub config: InvoicingConfig,
    pub db: MongoDb,
    pub invoices: InvoiceService<MongoDb>,
    pub settings: SettingsService<MongoDb>,
}

impl Application {
    /// Connect to MongoDB, bootstrap indexes and metrics, and assemble the
    /// services around a shared connection.
    pub async fn build(config: InvoicingConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
        db.initialize_indexes().await?;
        services::init_metrics();

        Ok(Self {
            invoices: InvoiceService::new(db.clone()),
            settings: SettingsService::new(db.clone()),
            db,
            config,
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.db.health_check().await
    }
}
