use super::{excel, repository};
use crate::shared::spreadsheet::export::{write_workbook, ExportFile};
use crate::shared::spreadsheet::import::{import_records, ImportOutcome, RowError};
use crate::shared::spreadsheet::reader::ParsedSheet;
use contracts::domain::a004_fleet_vehicle::{FleetVehicle, FleetVehicleDto};
use uuid::Uuid;

fn aggregate_from_dto(dto: FleetVehicleDto) -> FleetVehicle {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("VEH-{}", Uuid::new_v4()));
    let description = if dto.description.is_empty() {
        format!(
            "{} {}",
            dto.brand.clone().unwrap_or_default(),
            dto.model.clone().unwrap_or_default()
        )
        .trim()
        .to_string()
    } else {
        dto.description.clone()
    };
    FleetVehicle::new_for_insert(
        code,
        description,
        dto.plate.unwrap_or_default(),
        dto.brand.unwrap_or_default(),
        dto.model.unwrap_or_default(),
        dto.itv_due,
        dto.assigned_worker_id,
        dto.status.unwrap_or_else(|| "Operativo".to_string()),
        dto.comment,
    )
}

pub async fn create(dto: FleetVehicleDto) -> anyhow::Result<Uuid> {
    let mut aggregate = aggregate_from_dto(dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: FleetVehicleDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<FleetVehicle>> {
    repository::get_by_id(id).await
}

pub async fn list(search: Option<&str>, status: Option<&str>) -> anyhow::Result<Vec<FleetVehicle>> {
    let items = repository::list_all().await?;
    Ok(items
        .into_iter()
        .filter(|v| matches_filters(v, search, status))
        .collect())
}

fn matches_filters(vehicle: &FleetVehicle, search: Option<&str>, status: Option<&str>) -> bool {
    if let Some(q) = search {
        let q = q.to_lowercase();
        if !q.is_empty()
            && !vehicle.plate.to_lowercase().contains(&q)
            && !vehicle.brand.to_lowercase().contains(&q)
            && !vehicle.model.to_lowercase().contains(&q)
        {
            return false;
        }
    }
    if let Some(st) = status {
        if !st.is_empty() && vehicle.status != st {
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
        let mut aggregate = aggregate_from_dto(dto);
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
    write_workbook(&items, &excel::export_columns(), "flota")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(plate: &str, brand: &str, model: &str, status: &str) -> FleetVehicle {
        FleetVehicle::new_for_insert(
            "VEH-001".into(),
            format!("{brand} {model}"),
            plate.into(),
            brand.into(),
            model.into(),
            None,
            None,
            status.into(),
            None,
        )
    }

    #[test]
    fn test_search_matches_plate_brand_and_model() {
        let v = vehicle("1234-KLM", "Iveco", "Daily", "Operativo");
        assert!(matches_filters(&v, Some("klm"), None));
        assert!(matches_filters(&v, Some("iveco"), None));
        assert!(matches_filters(&v, Some("daily"), None));
        assert!(!matches_filters(&v, Some("furgón"), None));
    }

    #[test]
    fn test_status_facet_is_exact() {
        let v = vehicle("1234-KLM", "Iveco", "Daily", "Taller");
        assert!(matches_filters(&v, None, Some("Taller")));
        assert!(!matches_filters(&v, None, Some("Operativo")));
        assert!(matches_filters(&v, None, Some("")));
    }

    #[test]
    fn test_description_defaults_to_brand_and_model() {
        let dto = FleetVehicleDto {
            plate: Some("5678-XYZ".into()),
            brand: Some("Ford".into()),
            model: Some("Transit".into()),
            ..Default::default()
        };
        let aggregate = aggregate_from_dto(dto);
        assert_eq!(aggregate.base.description, "Ford Transit");
    }
}
