//! Invoice lifecycle manager: creation, updates, deletion and
//! quotation-to-invoice conversion.

use crate::models::{DashboardStats, Invoice, InvoiceCreate, InvoiceType};
use crate::services::metrics::INVOICES_TOTAL;
use crate::services::numbering::NumberAllocator;
use crate::services::repository::InvoiceRepository;
use crate::services::store::DocumentStore;
use mongodb::bson::{doc, to_document};
use service_core::error::AppError;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Clone)]
pub struct InvoiceService<S> {
    repository: InvoiceRepository<S>,
    allocator: NumberAllocator<S>,
}

impl<S: DocumentStore + Clone> InvoiceService<S> {
    pub fn new(store: S) -> Self {
        Self {
            repository: InvoiceRepository::new(store.clone()),
            allocator: NumberAllocator::new(store),
        }
    }

    /// Validate the payload, reserve the next invoice number, and persist
    /// the record. If the insert fails after the number was reserved, the
    /// number becomes a gap in the sequence.
    #[instrument(skip(self, payload), fields(tenant_id = %tenant_id))]
    pub async fn create_invoice(
        &self,
        tenant_id: &str,
        payload: InvoiceCreate,
    ) -> Result<Invoice, AppError> {
        payload.validate()?;

        let invoice_number = self.allocator.allocate(tenant_id).await?;
        let invoice = Invoice::new(tenant_id, invoice_number, payload);
        self.repository.insert(&invoice).await?;

        INVOICES_TOTAL
            .with_label_values(&[invoice.invoice_type.as_str()])
            .inc();
        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            invoice_type = invoice.invoice_type.as_str(),
            "Invoice created"
        );
        Ok(invoice)
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn get_invoice(&self, tenant_id: &str, invoice_id: &str) -> Result<Invoice, AppError> {
        self.repository
            .find_by_id(tenant_id, invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn list_invoices(&self, tenant_id: &str) -> Result<Vec<Invoice>, AppError> {
        self.repository.list_by_tenant(tenant_id).await
    }

    /// Full-replacement update: every payload field is written, while `id`,
    /// `invoice_number`, `created_at` and `tenant_id` stay untouched.
    #[instrument(skip(self, payload), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn update_invoice(
        &self,
        tenant_id: &str,
        invoice_id: &str,
        payload: InvoiceCreate,
    ) -> Result<Invoice, AppError> {
        payload.validate()?;

        let matched = self
            .repository
            .update(tenant_id, invoice_id, to_document(&payload)?)
            .await?;
        if matched == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")));
        }

        info!("Invoice updated");
        self.get_invoice(tenant_id, invoice_id).await
    }

    #[instrument(skip(self), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn delete_invoice(&self, tenant_id: &str, invoice_id: &str) -> Result<(), AppError> {
        let deleted = self.repository.delete(tenant_id, invoice_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!("Invoice not found")));
        }
        info!("Invoice deleted");
        Ok(())
    }

    /// Convert a quotation into a billable invoice, minting a fresh number.
    /// Only records that are still quotations match; converting an
    /// already-converted id fails with `NotFound`. If a concurrent
    /// conversion wins between our lookup and the write, the minted number
    /// becomes a gap.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, invoice_id = %invoice_id))]
    pub async fn convert_to_invoice(
        &self,
        tenant_id: &str,
        invoice_id: &str,
    ) -> Result<Invoice, AppError> {
        let quotation_filter = doc! {
            "_id": invoice_id,
            "invoice_type": InvoiceType::Quotation.as_str(),
        };

        self.repository
            .find_matching(tenant_id, quotation_filter.clone())
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quotation not found")))?;

        let invoice_number = self.allocator.allocate(tenant_id).await?;
        let matched = self
            .repository
            .update_matching(
                tenant_id,
                quotation_filter,
                doc! {
                    "invoice_type": InvoiceType::Invoice.as_str(),
                    "invoice_number": &invoice_number,
                },
            )
            .await?;
        if matched == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!("Quotation not found")));
        }

        INVOICES_TOTAL
            .with_label_values(&[InvoiceType::Invoice.as_str()])
            .inc();
        info!(invoice_number = %invoice_number, "Quotation converted to invoice");
        self.get_invoice(tenant_id, invoice_id).await
    }

    /// Invoice-side dashboard aggregates: totals grouped by the opaque
    /// `status` label plus the tenant's invoice count.
    #[instrument(skip(self), fields(tenant_id = %tenant_id))]
    pub async fn dashboard_stats(&self, tenant_id: &str) -> Result<DashboardStats, AppError> {
        let invoices = self.repository.list_by_tenant(tenant_id).await?;

        let mut stats = DashboardStats::default();
        for invoice in &invoices {
            match invoice.status.as_str() {
                "paid" => stats.total_revenue += invoice.total,
                "pending" => stats.pending_amount += invoice.total,
                "overdue" => stats.overdue_amount += invoice.total,
                _ => {}
            }
        }
        stats.invoice_count = self.repository.count(tenant_id).await?;
        Ok(stats)
    }
}
