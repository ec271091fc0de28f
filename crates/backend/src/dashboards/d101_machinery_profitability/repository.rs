use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

/// Raw per-machine figures for one month window
#[derive(Debug, Clone, FromQueryResult)]
pub struct MachineRow {
    pub machinery_id: String,
    pub machinery_name: String,
    pub monthly_rental_cost: f64,
    pub incident_count: i64,
}

/// All active machines with their rental cost and incident count in the
/// window. Always unfiltered: revenue attribution spreads the month's
/// certified revenue over every machine, so a single-machine request
/// still needs the full population.
pub async fn machine_costs(date_from: &str, date_to: &str) -> Result<Vec<MachineRow>> {
    let db = get_connection();

    let base_sql = r#"
        SELECT
            m.id AS machinery_id,
            m.description AS machinery_name,
            m.monthly_rental_cost,
            COALESCE((
                SELECT COUNT(*)
                FROM a009_incident i
                WHERE i.is_deleted = 0
                    AND i.machinery_id = m.id
                    AND i.date >= ? AND i.date <= ?
            ), 0) AS incident_count
        FROM a003_machinery m
        WHERE m.is_deleted = 0
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        format!("{} ORDER BY m.description", base_sql),
        [date_from.into(), date_to.into()],
    );

    let results = MachineRow::find_by_statement(stmt).all(db).await?;
    Ok(results)
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct RevenueTotal {
    pub total: Option<f64>,
}

/// Certified base revenue of the window, spread over active machines.
/// The original procedure attributed month revenue evenly since
/// certifications are not itemized per machine.
pub async fn certified_revenue(date_from: &str, date_to: &str) -> Result<f64> {
    let db = get_connection();
    let sql = r#"
        SELECT COALESCE(SUM(base_amount), 0) AS total
        FROM a005_certification
        WHERE is_deleted = 0 AND issue_date >= ? AND issue_date <= ?
    "#;
    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [date_from.into(), date_to.into()],
    );
    let row = RevenueTotal::find_by_statement(stmt).one(db).await?;
    Ok(row.and_then(|r| r.total).unwrap_or(0.0))
}
