//! Per-tenant settings: numbering state plus billing metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_INVOICE_PREFIX: &str = "INV";

/// One record per tenant, created lazily on first use. `invoice_counter`
/// holds the NEXT sequence number to issue; it never decreases and is
/// advanced exactly once per successful allocation. The billing metadata
/// fields are opaque to the numbering core and flow through
/// [`SettingsUpdate`] unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,
    pub tenant_id: String,
    pub invoice_prefix: String,
    pub invoice_counter: i64,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_gstin: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
    #[serde(default)]
    pub upi_id: String,
}

impl Settings {
    pub fn new(tenant_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            invoice_counter: 1,
            company_name: String::new(),
            company_gstin: String::new(),
            company_address: String::new(),
            bank_name: String::new(),
            account_number: String::new(),
            ifsc_code: String::new(),
            upi_id: String::new(),
        }
    }
}

/// Partial settings patch; only the provided fields are written. Setting
/// `invoice_counter` directly is possible but normally left to the
/// allocator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_counter: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}
