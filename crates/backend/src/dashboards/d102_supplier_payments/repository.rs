use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

/// Accrued (contract rental) and paid amounts per supplier for one month
#[derive(Debug, Clone, FromQueryResult)]
pub struct SupplierMonthRow {
    pub supplier_id: String,
    pub supplier_name: Option<String>,
    pub accrued_amount: Option<f64>,
    pub paid_amount: Option<f64>,
}

pub async fn supplier_month_totals(
    year: i32,
    month: u32,
    date_from: &str,
    date_to: &str,
) -> Result<Vec<SupplierMonthRow>> {
    let db = get_connection();

    let sql = r#"
        SELECT
            s.id AS supplier_id,
            s.description AS supplier_name,
            COALESCE((
                SELECT SUM(c.monthly_amount)
                FROM a006_supplier_contract c
                WHERE c.is_deleted = 0
                    AND c.supplier_id = s.id
                    AND c.start_date <= ?
                    AND (c.end_date IS NULL OR c.end_date >= ?)
            ), 0) AS accrued_amount,
            COALESCE((
                SELECT SUM(p.amount)
                FROM a008_supplier_payment p
                WHERE p.is_deleted = 0
                    AND p.supplier_id = s.id
                    AND p.year = ? AND p.month = ?
            ), 0) AS paid_amount
        FROM a002_supplier s
        WHERE s.is_deleted = 0
        ORDER BY s.description
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [
            date_to.into(),
            date_from.into(),
            year.into(),
            (month as i32).into(),
        ],
    );

    let results = SupplierMonthRow::find_by_statement(stmt).all(db).await?;
    Ok(results)
}
