use super::{excel, repository};
use crate::shared::spreadsheet::export::{write_workbook, ExportFile};
use crate::shared::spreadsheet::import::{import_records, ImportOutcome, RowError};
use crate::shared::spreadsheet::reader::ParsedSheet;
use contracts::domain::a003_machinery::{Machinery, MachineryDto};
use uuid::Uuid;

pub async fn create(dto: MachineryDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("MAQ-{}", Uuid::new_v4()));
    let mut aggregate = Machinery::new_for_insert(
        code,
        dto.description,
        dto.supplier_id.clone(),
        dto.category.unwrap_or_default(),
        dto.plate_or_serial.unwrap_or_default(),
        dto.monthly_rental_cost.unwrap_or(0.0),
        dto.status.unwrap_or_else(|| "Operativa".to_string()),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: MachineryDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Machinery>> {
    repository::get_by_id(id).await
}

pub async fn list(
    search: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
) -> anyhow::Result<Vec<Machinery>> {
    let items = repository::list_all().await?;
    Ok(items
        .into_iter()
        .filter(|m| matches_filters(m, search, category, status))
        .collect())
}

fn matches_filters(
    machinery: &Machinery,
    search: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
) -> bool {
    if let Some(q) = search {
        let q = q.to_lowercase();
        if !q.is_empty()
            && !machinery.base.description.to_lowercase().contains(&q)
            && !machinery.base.code.to_lowercase().contains(&q)
            && !machinery.plate_or_serial.to_lowercase().contains(&q)
        {
            return false;
        }
    }
    if let Some(c) = category {
        if !c.is_empty() && machinery.category != c {
            return false;
        }
    }
    if let Some(st) = status {
        if !st.is_empty() && machinery.status != st {
            return false;
        }
    }
    true
}

pub async fn import_sheet(sheet: &ParsedSheet) -> anyhow::Result<ImportOutcome> {
    let dtos = match import_records(sheet, &excel::column_specs(), excel::dto_from_row) {
        Ok(dtos) => dtos,
        Err(e) => return Ok(e.into()),
    };

    let mut errors: Vec<RowError> = Vec::new();
    let mut aggregates = Vec::with_capacity(dtos.len());
    for (idx, dto) in dtos.into_iter().enumerate() {
        let code = dto
            .code
            .clone()
            .unwrap_or_else(|| format!("MAQ-{}", Uuid::new_v4()));
        let mut aggregate = Machinery::new_for_insert(
            code,
            dto.description,
            dto.supplier_id.clone(),
            dto.category.unwrap_or_default(),
            dto.plate_or_serial.unwrap_or_default(),
            dto.monthly_rental_cost.unwrap_or(0.0),
            dto.status.unwrap_or_else(|| "Operativa".to_string()),
            dto.comment,
        );
        if let Err(reason) = aggregate.validate() {
            errors.push(RowError {
                row: idx + 1,
                reasons: vec![reason],
            });
            continue;
        }
        aggregate.before_write();
        aggregates.push(aggregate);
    }

    if !errors.is_empty() {
        return Ok(ImportOutcome::Rejected { errors });
    }

    let count = repository::insert_many(&aggregates).await?;
    Ok(ImportOutcome::Inserted { count })
}

pub async fn export_excel() -> anyhow::Result<ExportFile> {
    let items = repository::list_all().await?;
    write_workbook(&items, &excel::export_columns(), "maquinaria")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(name: &str, category: &str, status: &str) -> Machinery {
        Machinery::new_for_insert(
            "MAQ-001".into(),
            name.into(),
            None,
            category.into(),
            "E-1234-BCD".into(),
            1850.0,
            status.into(),
            None,
        )
    }

    #[test]
    fn test_search_and_facet_are_conjunctive() {
        let grua = machine("Grúa torre Liebherr", "Equipos", "Operativa");
        let camion = machine("Camión grúa", "Vehículos", "Operativa");

        // "grúa" + category "Equipos" must match only the tower crane
        assert!(matches_filters(&grua, Some("grúa"), Some("Equipos"), None));
        assert!(!matches_filters(&camion, Some("grúa"), Some("Equipos"), None));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let grua = machine("Grúa torre", "Equipos", "Operativa");
        assert!(matches_filters(&grua, Some("GRÚA"), None, None));
        assert!(matches_filters(&grua, Some("e-1234"), None, None));
    }

    #[tokio::test]
    async fn test_import_rejects_negative_rental_cost() {
        let mut row = std::collections::HashMap::new();
        row.insert("Nombre".to_string(), "Grúa torre".to_string());
        row.insert("Coste Mensual".to_string(), "-1.234,56".to_string());
        let sheet = ParsedSheet {
            headers: vec![],
            rows: vec![row],
        };

        let outcome = import_sheet(&sheet).await.unwrap();
        match outcome {
            ImportOutcome::Rejected { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].row, 1);
                assert!(errors[0].reasons[0].contains("negativo"));
            }
            ImportOutcome::Inserted { .. } => panic!("negative cost must not import"),
        }
    }
}
