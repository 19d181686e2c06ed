//! Invoice model for invoice-service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Invoice kind. A quotation is not yet billable; it may transition to
/// `Invoice` exactly once, via conversion. `Invoice` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    Invoice,
    Quotation,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "invoice",
            InvoiceType::Quotation => "quotation",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "quotation" => InvoiceType::Quotation,
            _ => InvoiceType::Invoice,
        }
    }
}

/// A single line on an invoice. `amount` is stored as the caller supplied
/// it; the service never recomputes `quantity * rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Invoice document. `status` is an opaque caller-supplied label with no
/// enforced state machine; `invoice_type` is the one field with lifecycle
/// rules. `created_at` is persisted in its RFC 3339 textual form and
/// reconstructed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: String,
    pub invoice_number: String,
    pub tenant_id: String,
    pub client_id: String,
    pub invoice_date: String,
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total: Decimal,
    pub status: String,
    pub invoice_type: InvoiceType,
    pub is_recurring: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(tenant_id: &str, invoice_number: String, payload: InvoiceCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            invoice_number,
            tenant_id: tenant_id.to_string(),
            client_id: payload.client_id,
            invoice_date: payload.invoice_date,
            due_date: payload.due_date,
            items: payload.items,
            subtotal: payload.subtotal,
            cgst: payload.cgst,
            sgst: payload.sgst,
            igst: payload.igst,
            total: payload.total,
            status: payload.status,
            invoice_type: payload.invoice_type,
            is_recurring: payload.is_recurring,
            notes: payload.notes,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating an invoice, and the full-replacement payload for
/// updates. Carries every invoice field except `id`, `invoice_number`,
/// `created_at` and `tenant_id`, which the service controls. The referenced
/// `client_id` is stored verbatim; its existence is not checked here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InvoiceCreate {
    #[validate(length(min = 1, message = "client_id must not be empty"))]
    pub client_id: String,
    #[validate(length(min = 1, message = "invoice_date must not be empty"))]
    pub invoice_date: String,
    #[validate(length(min = 1, message = "due_date must not be empty"))]
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total: Decimal,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_invoice_type")]
    pub invoice_type: InvoiceType,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> String {
    "pending".to_string()
}

fn default_invoice_type() -> InvoiceType {
    InvoiceType::Invoice
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, to_document};

    #[test]
    fn invoice_type_serializes_lowercase() {
        let doc = to_document(&Invoice::new(
            "tenant-1",
            "INV-0001".to_string(),
            sample_payload(InvoiceType::Quotation),
        ))
        .expect("serialize invoice");
        assert_eq!(doc.get_str("invoice_type").unwrap(), "quotation");
    }

    #[test]
    fn from_string_treats_unknown_values_as_invoice() {
        assert_eq!(InvoiceType::from_string("quotation"), InvoiceType::Quotation);
        assert_eq!(InvoiceType::from_string("invoice"), InvoiceType::Invoice);
        assert_eq!(InvoiceType::from_string("draft"), InvoiceType::Invoice);
    }

    #[test]
    fn create_payload_defaults_apply() {
        let payload: InvoiceCreate = from_document(doc! {
            "client_id": "client-1",
            "invoice_date": "2024-01-01",
            "due_date": "2024-01-31",
            "items": [],
            "subtotal": "100",
            "cgst": "0",
            "sgst": "0",
            "igst": "18",
            "total": "118",
        })
        .expect("deserialize payload");

        assert_eq!(payload.status, "pending");
        assert_eq!(payload.invoice_type, InvoiceType::Invoice);
        assert!(!payload.is_recurring);
        assert!(payload.notes.is_none());
    }

    #[test]
    fn created_at_round_trips_through_text() {
        let invoice = Invoice::new(
            "tenant-1",
            "INV-0001".to_string(),
            sample_payload(InvoiceType::Invoice),
        );
        let doc = to_document(&invoice).expect("serialize invoice");
        // Persisted as a plain string, not a BSON datetime.
        assert!(doc.get_str("created_at").is_ok());

        let restored: Invoice = from_document(doc).expect("deserialize invoice");
        assert_eq!(restored.created_at, invoice.created_at);
    }

    fn sample_payload(invoice_type: InvoiceType) -> InvoiceCreate {
        InvoiceCreate {
            client_id: "client-1".to_string(),
            invoice_date: "2024-01-01".to_string(),
            due_date: "2024-01-31".to_string(),
            items: vec![InvoiceItem {
                description: "Design work".to_string(),
                quantity: Decimal::ONE,
                rate: Decimal::new(10000, 2),
                amount: Decimal::new(10000, 2),
            }],
            subtotal: Decimal::new(10000, 2),
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: Decimal::new(1800, 2),
            total: Decimal::new(11800, 2),
            status: "pending".to_string(),
            invoice_type,
            is_recurring: false,
            notes: None,
        }
    }
}
