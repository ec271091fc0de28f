use axum::extract::Query;
use axum::Json;

use crate::dashboards::{d100_monthly_costs, d101_machinery_profitability, d102_supplier_payments};
use contracts::dashboards::d100_monthly_costs::{MonthlyCostsRequest, MonthlyCostsResponse};
use contracts::dashboards::d101_machinery_profitability::{
    MachineryProfitabilityRequest, MachineryProfitabilityRow,
};
use contracts::dashboards::d102_supplier_payments::{SupplierPaymentsRequest, SupplierPaymentsRow};

/// GET /api/dashboards/monthly-costs?year=&month=
pub async fn monthly_costs(
    Query(request): Query<MonthlyCostsRequest>,
) -> Result<Json<MonthlyCostsResponse>, axum::http::StatusCode> {
    if request.month < 1 || request.month > 12 {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match d100_monthly_costs::service::get_monthly_costs(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Monthly costs dashboard failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboards/machinery-profitability?year=&month=&machineryId=
pub async fn machinery_profitability(
    Query(request): Query<MachineryProfitabilityRequest>,
) -> Result<Json<Vec<MachineryProfitabilityRow>>, axum::http::StatusCode> {
    if request.month < 1 || request.month > 12 {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match d101_machinery_profitability::service::get_machinery_profitability(request).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Machinery profitability dashboard failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboards/supplier-payments?year=&month=
pub async fn supplier_payments(
    Query(request): Query<SupplierPaymentsRequest>,
) -> Result<Json<Vec<SupplierPaymentsRow>>, axum::http::StatusCode> {
    if request.month < 1 || request.month > 12 {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match d102_supplier_payments::service::get_supplier_payments(request).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Supplier payments dashboard failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
