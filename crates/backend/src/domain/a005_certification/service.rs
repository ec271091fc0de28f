use super::{excel, repository};
use crate::domain::a001_project;
use crate::shared::spreadsheet::export::{write_workbook, ExportFile};
use crate::shared::spreadsheet::import::{import_records, ImportOutcome, RowError};
use crate::shared::spreadsheet::reader::ParsedSheet;
use contracts::domain::a005_certification::{Certification, CertificationDto};
use contracts::shared::finance::{accumulate, PeriodEntry};
use uuid::Uuid;

const DEFAULT_IVA_RATE: f64 = 21.0;

/// Retention defaults to the project's contractual rate when the form
/// leaves it blank
async fn resolve_retention(project_id: &str, dto_rate: Option<f64>) -> anyhow::Result<f64> {
    if let Some(rate) = dto_rate {
        return Ok(rate);
    }
    let uuid = Uuid::parse_str(project_id)
        .map_err(|_| anyhow::anyhow!("Identificador de obra no válido"))?;
    let project = a001_project::repository::get_by_id(uuid)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Obra no encontrada"))?;
    Ok(project.retention_rate)
}

/// Recompute the running totals of every certification of a project.
/// Called after any write so records stay consistent even when a
/// certification is inserted or edited out of date order.
async fn resequence_project(project_id: &str) -> anyhow::Result<()> {
    let mut certs = repository::list_by_project(project_id).await?;
    let entries: Vec<PeriodEntry> = certs
        .iter()
        .map(|c| PeriodEntry {
            issue_date: c.issue_date,
            base_amount: c.base_amount,
        })
        .collect();
    let totals = accumulate(&entries);

    for (cert, total) in certs.iter_mut().zip(totals) {
        if (cert.accumulated_amount - total).abs() > 0.005 {
            cert.accumulated_amount = total;
            repository::update(cert).await?;
        }
    }
    Ok(())
}

pub async fn create(dto: CertificationDto) -> anyhow::Result<Uuid> {
    let retention_rate = resolve_retention(&dto.project_id, dto.retention_rate).await?;
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CER-{}", Uuid::new_v4()));

    let mut aggregate = Certification::new_for_insert(
        code,
        dto.description,
        dto.project_id.clone(),
        dto.issue_date,
        dto.base_amount,
        dto.iva_rate.unwrap_or(DEFAULT_IVA_RATE),
        retention_rate,
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.recompute(0.0);
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    resequence_project(&dto.project_id).await?;
    Ok(id)
}

pub async fn update(dto: CertificationDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;
    let previous_project = aggregate.project_id.clone();

    aggregate.update(&dto);
    aggregate.retention_rate = resolve_retention(&aggregate.project_id, dto.retention_rate).await?;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.recompute(aggregate.accumulated_amount);
    aggregate.before_write();

    repository::update(&aggregate).await?;
    resequence_project(&aggregate.project_id).await?;
    if previous_project != aggregate.project_id {
        resequence_project(&previous_project).await?;
    }
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let existing = repository::get_by_id(id).await?;
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        if let Some(cert) = existing {
            resequence_project(&cert.project_id).await?;
        }
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Certification>> {
    repository::get_by_id(id).await
}

pub async fn list(project_id: Option<&str>) -> anyhow::Result<Vec<Certification>> {
    match project_id {
        Some(pid) if !pid.is_empty() => repository::list_by_project(pid).await,
        _ => repository::list_all().await,
    }
}

pub async fn import_sheet(sheet: &ParsedSheet) -> anyhow::Result<ImportOutcome> {
    let rows = match import_records(sheet, &excel::column_specs(), excel::row_from_mapped) {
        Ok(rows) => rows,
        Err(e) => return Ok(e.into()),
    };

    // Resolve project references by code; unknown codes reject the batch
    let projects = a001_project::repository::list_all().await?;
    let mut errors: Vec<RowError> = Vec::new();
    let mut aggregates = Vec::with_capacity(rows.len());
    let mut touched: Vec<String> = Vec::new();

    for (idx, row) in rows.into_iter().enumerate() {
        let project = projects
            .iter()
            .find(|p| p.base.code == row.project_ref || p.base.id.value().to_string() == row.project_ref);
        let Some(project) = project else {
            errors.push(RowError {
                row: idx + 1,
                reasons: vec![format!("obra desconocida: '{}'", row.project_ref)],
            });
            continue;
        };

        let project_id = project.base.id.value().to_string();
        let retention_rate = row.retention_rate.unwrap_or(project.retention_rate);
        let mut aggregate = Certification::new_for_insert(
            format!("CER-{}", Uuid::new_v4()),
            row.description,
            project_id.clone(),
            row.issue_date,
            row.base_amount,
            row.iva_rate.unwrap_or(DEFAULT_IVA_RATE),
            retention_rate,
            None,
        );
        if let Err(reason) = aggregate.validate() {
            errors.push(RowError {
                row: idx + 1,
                reasons: vec![reason],
            });
            continue;
        }
        aggregate.recompute(0.0);
        aggregate.before_write();
        aggregates.push(aggregate);
        if !touched.contains(&project_id) {
            touched.push(project_id);
        }
    }

    if !errors.is_empty() {
        return Ok(ImportOutcome::Rejected { errors });
    }

    let count = repository::insert_many(&aggregates).await?;
    for project_id in &touched {
        resequence_project(project_id).await?;
    }
    Ok(ImportOutcome::Inserted { count })
}

pub async fn export_excel(project_id: Option<&str>) -> anyhow::Result<ExportFile> {
    let items = list(project_id).await?;
    write_workbook(&items, &excel::export_columns(), "certificaciones")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Same parse-then-validate sequence import_sheet runs per row, minus
    // the project lookup.
    #[test]
    fn test_negative_base_amount_fails_validation() {
        let mut row = HashMap::new();
        row.insert("Obra".to_string(), "OBR-001".to_string());
        row.insert("Fecha".to_string(), "31/03/2026".to_string());
        row.insert("Importe Base".to_string(), "-1.234,56".to_string());
        let sheet = ParsedSheet {
            headers: vec![],
            rows: vec![row],
        };

        let rows =
            import_records(&sheet, &excel::column_specs(), excel::row_from_mapped).unwrap();
        assert_eq!(rows[0].base_amount, -1234.56);

        let aggregate = Certification::new_for_insert(
            "CER-test".into(),
            rows[0].description.clone(),
            "OBR-001".into(),
            rows[0].issue_date,
            rows[0].base_amount,
            rows[0].iva_rate.unwrap_or(DEFAULT_IVA_RATE),
            5.0,
            None,
        );
        let reason = aggregate.validate().unwrap_err();
        assert!(reason.contains("negativo"));
    }
}
