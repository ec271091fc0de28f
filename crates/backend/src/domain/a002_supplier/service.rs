use super::{excel, repository};
use crate::shared::spreadsheet::export::{write_workbook, ExportFile};
use crate::shared::spreadsheet::import::{import_records, ImportOutcome, RowError};
use crate::shared::spreadsheet::reader::ParsedSheet;
use contracts::domain::a002_supplier::{Supplier, SupplierDto};
use uuid::Uuid;

pub async fn create(dto: SupplierDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PRV-{}", Uuid::new_v4()));
    let mut aggregate = Supplier::new_for_insert(
        code,
        dto.description,
        dto.legal_name.unwrap_or_default(),
        dto.cif.unwrap_or_default(),
        dto.contact_email.unwrap_or_default(),
        dto.phone.unwrap_or_default(),
        dto.category.unwrap_or_default(),
        dto.payment_terms_days.unwrap_or(0),
        dto.status.unwrap_or_else(|| "Activo".to_string()),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: SupplierDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Supplier>> {
    repository::get_by_id(id).await
}

/// List suppliers applying the conjunction of all active filters:
/// free-text search over name/code/CIF plus exact category and status facets.
pub async fn list(
    search: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
) -> anyhow::Result<Vec<Supplier>> {
    let items = repository::list_all().await?;
    Ok(items
        .into_iter()
        .filter(|s| matches_filters(s, search, category, status))
        .collect())
}

fn matches_filters(
    supplier: &Supplier,
    search: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
) -> bool {
    if let Some(q) = search {
        let q = q.to_lowercase();
        if !q.is_empty()
            && !supplier.base.description.to_lowercase().contains(&q)
            && !supplier.base.code.to_lowercase().contains(&q)
            && !supplier.legal_name.to_lowercase().contains(&q)
            && !supplier.cif.to_lowercase().contains(&q)
        {
            return false;
        }
    }
    if let Some(c) = category {
        if !c.is_empty() && supplier.category != c {
            return false;
        }
    }
    if let Some(st) = status {
        if !st.is_empty() && supplier.status != st {
            return false;
        }
    }
    true
}

/// Import suppliers from a parsed spreadsheet. All-or-nothing: any invalid
/// row rejects the batch before the first insert.
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
            .unwrap_or_else(|| format!("PRV-{}", Uuid::new_v4()));
        let mut aggregate = Supplier::new_for_insert(
            code,
            dto.description,
            dto.legal_name.unwrap_or_default(),
            dto.cif.unwrap_or_default(),
            dto.contact_email.unwrap_or_default(),
            dto.phone.unwrap_or_default(),
            dto.category.unwrap_or_default(),
            dto.payment_terms_days.unwrap_or(0),
            dto.status.unwrap_or_else(|| "Activo".to_string()),
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
    write_workbook(&items, &excel::export_columns(), "proveedores")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_supplier::Supplier;

    fn supplier(name: &str, category: &str, status: &str) -> Supplier {
        Supplier::new_for_insert(
            "PRV-001".into(),
            name.into(),
            String::new(),
            "B12345678".into(),
            String::new(),
            String::new(),
            category.into(),
            30,
            status.into(),
            None,
        )
    }

    #[test]
    fn test_filter_is_case_insensitive_conjunction() {
        let gruas = supplier("Grúas del Sur", "Equipos", "Activo");
        let aridos = supplier("Áridos SA", "Materiales", "Activo");

        assert!(matches_filters(&gruas, Some("grúa"), Some("Equipos"), None));
        assert!(!matches_filters(&aridos, Some("grúa"), Some("Equipos"), None));
        // matching search but wrong facet
        assert!(!matches_filters(&gruas, Some("grúa"), Some("Materiales"), None));
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let s = supplier("Cualquiera", "Equipos", "Activo");
        assert!(matches_filters(&s, None, None, None));
        assert!(matches_filters(&s, Some(""), Some(""), Some("")));
    }

    #[test]
    fn test_search_matches_cif() {
        let s = supplier("Grúas del Sur", "Equipos", "Activo");
        assert!(matches_filters(&s, Some("b1234"), None, None));
    }
}
