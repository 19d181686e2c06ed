//! Domain models for invoice-service.

mod invoice;
mod settings;
mod stats;

pub use invoice::{Invoice, InvoiceCreate, InvoiceItem, InvoiceType};
pub use settings::{Settings, SettingsUpdate, DEFAULT_INVOICE_PREFIX};
pub use stats::DashboardStats;
