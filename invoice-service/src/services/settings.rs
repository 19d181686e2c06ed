//! Per-tenant settings store with lazy, race-safe creation.

use crate::models::{Settings, SettingsUpdate};
use crate::services::store::{DocumentStore, SETTINGS};
use mongodb::bson::{doc, from_document, to_document};
use service_core::error::AppError;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct SettingsService<S> {
    store: S,
}

impl<S: DocumentStore> SettingsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch the tenant's settings, creating the default record on first
    /// use. The creation is an upsert with `$setOnInsert`, not a
    /// check-then-insert: two concurrent first requests both land on the
    /// same canonical record, the losing write is absorbed.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn get(&self, tenant_id: &str) -> Result<Settings, AppError> {
        let defaults = to_document(&Settings::new(tenant_id))?;
        self.store
            .update_one(
                SETTINGS,
                doc! { "tenant_id": tenant_id },
                doc! { "$setOnInsert": defaults },
                true,
            )
            .await?;

        let doc = self
            .store
            .find_one(SETTINGS, doc! { "tenant_id": tenant_id })
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Settings record missing after upsert for tenant {}",
                    tenant_id
                ))
            })?;
        Ok(from_document(doc)?)
    }

    /// Merge the provided fields into the tenant's settings, creating the
    /// record with defaults for everything else if it does not exist yet.
    #[instrument(skip(self, update), fields(tenant_id = %tenant_id))]
    pub async fn update(
        &self,
        tenant_id: &str,
        update: &SettingsUpdate,
    ) -> Result<Settings, AppError> {
        let patch = to_document(update)?;
        if patch.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "No settings fields provided"
            )));
        }

        // Defaults for fields the patch does not touch; a key may not appear
        // in both $set and $setOnInsert.
        let mut defaults = to_document(&Settings::new(tenant_id))?;
        for key in patch.keys() {
            defaults.remove(key);
        }

        self.store
            .update_one(
                SETTINGS,
                doc! { "tenant_id": tenant_id },
                doc! { "$set": patch, "$setOnInsert": defaults },
                true,
            )
            .await?;

        info!("Settings updated");
        self.get(tenant_id).await
    }
}
