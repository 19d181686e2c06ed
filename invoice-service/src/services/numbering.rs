//! Per-tenant invoice number allocation.

use crate::models::Settings;
use crate::services::metrics::NUMBERS_ALLOCATED_TOTAL;
use crate::services::settings::SettingsService;
use crate::services::store::{DocumentStore, SETTINGS};
use mongodb::bson::{doc, from_document};
use service_core::error::AppError;
use tracing::{debug, instrument};

/// Mints unique, sequential invoice numbers per tenant, durably advancing
/// the counter so a number is never issued twice.
#[derive(Clone)]
pub struct NumberAllocator<S> {
    store: S,
    settings: SettingsService<S>,
}

impl<S: DocumentStore + Clone> NumberAllocator<S> {
    pub fn new(store: S) -> Self {
        Self {
            settings: SettingsService::new(store.clone()),
            store,
        }
    }

    /// Reserve the next sequence number for the tenant and advance the
    /// counter. The reserve-and-advance is a single atomic
    /// find-one-and-update (`$inc` returning the pre-increment document), so
    /// concurrent allocations for one tenant always see distinct counter
    /// values. A failure in the caller after this point leaves a numbering
    /// gap; gaps are acceptable, duplicates are not.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn allocate(&self, tenant_id: &str) -> Result<String, AppError> {
        // Lazy-create the settings record so the pre-image below always
        // carries (prefix, counter). Idempotent upsert, safe to race.
        self.settings.get(tenant_id).await?;

        let before = self
            .store
            .find_one_and_update(
                SETTINGS,
                doc! { "tenant_id": tenant_id },
                doc! { "$inc": { "invoice_counter": 1i64 } },
            )
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Settings record disappeared during allocation for tenant {}",
                    tenant_id
                ))
            })?;

        let snapshot: Settings = from_document(before)?;
        let number = format_invoice_number(&snapshot.invoice_prefix, snapshot.invoice_counter);
        NUMBERS_ALLOCATED_TOTAL.inc();
        debug!(invoice_number = %number, "Invoice number reserved");
        Ok(number)
    }
}

/// `{prefix}-{counter}` with the counter zero-padded to four digits. Past
/// 9999 the counter simply widens.
pub fn format_invoice_number(prefix: &str, counter: i64) -> String {
    format!("{}-{:04}", prefix, counter)
}
