use anyhow::Result;
use contracts::dashboards::d100_monthly_costs::{
    MonthlyCostsRequest, MonthlyCostsResponse, MonthlyCostsRow, PeriodRange,
};
use contracts::shared::finance::round_cents;

use super::repository;

/// Month rollup across supplier invoices, machinery rentals, payments and
/// certified revenue
pub async fn get_monthly_costs(request: MonthlyCostsRequest) -> Result<MonthlyCostsResponse> {
    let range = PeriodRange::for_month(request.year, request.month);
    let period = format!("{:04}-{:02}", request.year, request.month);

    let invoices = repository::invoice_costs(&range.date_from, &range.date_to).await?;
    let rentals = repository::machinery_rental_costs(&range.date_from, &range.date_to).await?;
    let payments = repository::payment_costs(request.year, request.month).await?;
    let revenue = repository::certified_revenue(&range.date_from, &range.date_to).await?;

    let rows = vec![
        MonthlyCostsRow {
            concept: "invoices".to_string(),
            concept_name: "Facturas de proveedor".to_string(),
            amount: round_cents(invoices),
        },
        MonthlyCostsRow {
            concept: "machinery_rental".to_string(),
            concept_name: "Alquiler de maquinaria".to_string(),
            amount: round_cents(rentals),
        },
        MonthlyCostsRow {
            concept: "payments".to_string(),
            concept_name: "Pagos a proveedores".to_string(),
            amount: round_cents(payments),
        },
    ];

    // Payments are cash-out, not accrual; the cost total counts invoices
    // and rentals only
    let total_costs = round_cents(invoices + rentals);

    Ok(MonthlyCostsResponse {
        period,
        rows,
        total_costs,
        total_revenue: round_cents(revenue),
    })
}
