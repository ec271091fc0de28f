use serde::{Deserialize, Serialize};

/// Request for the per-supplier monthly payment summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPaymentsRequest {
    pub year: i32,
    pub month: u32,
}

/// Aggregated amount owed/paid to one supplier for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPaymentsRow {
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
    pub year: i32,
    pub month: u32,
    /// Rental cost accrued from leased machinery contracts
    #[serde(rename = "accruedAmount")]
    pub accrued_amount: f64,
    /// Amount actually paid in the month
    #[serde(rename = "paidAmount")]
    pub paid_amount: f64,
}
