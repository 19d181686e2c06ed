//! Tenant-scoped invoice persistence over the document store.

use crate::models::Invoice;
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::{DocumentStore, INVOICES};
use mongodb::bson::{doc, from_document, to_document, Document};
use service_core::error::AppError;
use tracing::instrument;

/// Every operation filters by `tenant_id`; a record belonging to another
/// tenant is unreachable even with its exact id.
#[derive(Clone)]
pub struct InvoiceRepository<S> {
    store: S,
}

impl<S: DocumentStore> InvoiceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn scoped(tenant_id: &str, invoice_id: &str) -> Document {
        doc! { "_id": invoice_id, "tenant_id": tenant_id }
    }

    #[instrument(skip(self, invoice), fields(tenant_id = %invoice.tenant_id, invoice_id = %invoice.id))]
    pub async fn insert(&self, invoice: &Invoice) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_invoice"])
            .start_timer();
        self.store
            .insert_one(INVOICES, to_document(invoice)?)
            .await?;
        timer.observe_duration();
        Ok(())
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn find_by_id(
        &self,
        tenant_id: &str,
        invoice_id: &str,
    ) -> Result<Option<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_invoice"])
            .start_timer();
        let doc = self
            .store
            .find_one(INVOICES, Self::scoped(tenant_id, invoice_id))
            .await?;
        timer.observe_duration();
        doc.map(from_document).transpose().map_err(AppError::from)
    }

    /// First invoice matching `filter` within the tenant's records.
    #[instrument(skip(self, filter), fields(tenant_id = %tenant_id))]
    pub async fn find_matching(
        &self,
        tenant_id: &str,
        mut filter: Document,
    ) -> Result<Option<Invoice>, AppError> {
        filter.insert("tenant_id", tenant_id);
        let doc = self.store.find_one(INVOICES, filter).await?;
        doc.map(from_document).transpose().map_err(AppError::from)
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Invoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();
        let docs = self
            .store
            .find_many(INVOICES, doc! { "tenant_id": tenant_id })
            .await?;
        timer.observe_duration();

        docs.into_iter()
            .map(|doc| from_document(doc).map_err(AppError::from))
            .collect()
    }

    /// `$set` the given fields on the tenant's invoice. Returns the matched
    /// count; 0 means no such invoice for this tenant.
    #[instrument(skip(self, fields), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn update(
        &self,
        tenant_id: &str,
        invoice_id: &str,
        fields: Document,
    ) -> Result<u64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_invoice"])
            .start_timer();
        let matched = self
            .store
            .update_one(
                INVOICES,
                Self::scoped(tenant_id, invoice_id),
                doc! { "$set": fields },
                false,
            )
            .await?;
        timer.observe_duration();
        Ok(matched)
    }

    /// Like [`update`](Self::update) but with extra filter conditions, for
    /// state-dependent transitions (e.g. "still a quotation").
    #[instrument(skip(self, filter, fields), fields(tenant_id = %tenant_id))]
    pub async fn update_matching(
        &self,
        tenant_id: &str,
        mut filter: Document,
        fields: Document,
    ) -> Result<u64, AppError> {
        filter.insert("tenant_id", tenant_id);
        self.store
            .update_one(INVOICES, filter, doc! { "$set": fields }, false)
            .await
    }

    /// Returns the deleted count; 0 means no such invoice for this tenant.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn delete(&self, tenant_id: &str, invoice_id: &str) -> Result<u64, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_invoice"])
            .start_timer();
        let deleted = self
            .store
            .delete_one(INVOICES, Self::scoped(tenant_id, invoice_id))
            .await?;
        timer.observe_duration();
        Ok(deleted)
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn count(&self, tenant_id: &str) -> Result<u64, AppError> {
        self.store
            .count_documents(INVOICES, doc! { "tenant_id": tenant_id })
            .await
    }
}
