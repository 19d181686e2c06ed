//! Services module for invoice-service.

pub mod database;
pub mod invoices;
pub mod metrics;
pub mod numbering;
pub mod repository;
pub mod settings;
pub mod store;

pub use database::MongoDb;
pub use invoices::InvoiceService;
pub use metrics::{get_metrics, init_metrics};
pub use numbering::NumberAllocator;
pub use repository::InvoiceRepository;
pub use settings::SettingsService;
pub use store::DocumentStore;
