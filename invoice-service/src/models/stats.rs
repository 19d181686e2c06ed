//! Dashboard aggregates over a tenant's invoices.

use rust_decimal::Decimal;
use serde::Serialize;

/// Invoice-side dashboard figures. Sums are grouped by the opaque `status`
/// label; invoices with any other status contribute only to the count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub pending_amount: Decimal,
    pub overdue_amount: Decimal,
    pub invoice_count: u64,
}
