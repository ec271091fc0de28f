use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

/// Raw per-concept totals for one month window
#[derive(Debug, Clone, FromQueryResult)]
pub struct ConceptTotal {
    pub total: Option<f64>,
}

async fn scalar_total(sql: &str, values: Vec<sea_orm::Value>) -> Result<f64> {
    let db = get_connection();
    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, values);
    let row = ConceptTotal::find_by_statement(stmt).one(db).await?;
    Ok(row.and_then(|r| r.total).unwrap_or(0.0))
}

/// Supplier invoice bases accrued in the window
pub async fn invoice_costs(date_from: &str, date_to: &str) -> Result<f64> {
    let sql = r#"
        SELECT COALESCE(SUM(base_amount), 0) AS total
        FROM a007_supplier_invoice
        WHERE is_deleted = 0 AND issue_date >= ? AND issue_date <= ?
    "#;
    scalar_total(sql, vec![date_from.into(), date_to.into()]).await
}

/// Supplier payments recorded for the given calendar month
pub async fn payment_costs(year: i32, month: u32) -> Result<f64> {
    let sql = r#"
        SELECT COALESCE(SUM(amount), 0) AS total
        FROM a008_supplier_payment
        WHERE is_deleted = 0 AND year = ? AND month = ?
    "#;
    scalar_total(sql, vec![year.into(), (month as i32).into()]).await
}

/// Monthly rental of machinery whose contract covers the window
pub async fn machinery_rental_costs(date_from: &str, date_to: &str) -> Result<f64> {
    let sql = r#"
        SELECT COALESCE(SUM(c.monthly_amount), 0) AS total
        FROM a006_supplier_contract c
        WHERE c.is_deleted = 0
            AND c.start_date <= ?
            AND (c.end_date IS NULL OR c.end_date >= ?)
    "#;
    scalar_total(sql, vec![date_to.into(), date_from.into()]).await
}

/// Certified revenue issued in the window
pub async fn certified_revenue(date_from: &str, date_to: &str) -> Result<f64> {
    let sql = r#"
        SELECT COALESCE(SUM(base_amount), 0) AS total
        FROM a005_certification
        WHERE is_deleted = 0 AND issue_date >= ? AND issue_date <= ?
    "#;
    scalar_total(sql, vec![date_from.into(), date_to.into()]).await
}
