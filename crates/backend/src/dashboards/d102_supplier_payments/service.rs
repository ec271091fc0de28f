use anyhow::Result;
use contracts::dashboards::d100_monthly_costs::PeriodRange;
use contracts::dashboards::d102_supplier_payments::{SupplierPaymentsRequest, SupplierPaymentsRow};
use contracts::shared::finance::round_cents;

use super::repository;

/// Per-supplier accrued vs. paid amounts for one calendar month.
/// Suppliers with no movement in the month are dropped.
pub async fn get_supplier_payments(
    request: SupplierPaymentsRequest,
) -> Result<Vec<SupplierPaymentsRow>> {
    let range = PeriodRange::for_month(request.year, request.month);

    let totals = repository::supplier_month_totals(
        request.year,
        request.month,
        &range.date_from,
        &range.date_to,
    )
    .await?;

    let rows = totals
        .into_iter()
        .filter(|t| t.accrued_amount.unwrap_or(0.0) != 0.0 || t.paid_amount.unwrap_or(0.0) != 0.0)
        .map(|t| SupplierPaymentsRow {
            supplier_id: t.supplier_id,
            supplier_name: t.supplier_name.unwrap_or_default(),
            year: request.year,
            month: request.month,
            accrued_amount: round_cents(t.accrued_amount.unwrap_or(0.0)),
            paid_amount: round_cents(t.paid_amount.unwrap_or(0.0)),
        })
        .collect();

    Ok(rows)
}
