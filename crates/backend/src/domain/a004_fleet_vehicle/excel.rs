//! Column mapping between fleet spreadsheets and [`FleetVehicleDto`]

use crate::shared::spreadsheet::export::{CellValue, ExportColumn};
use crate::shared::spreadsheet::import::{parse_date, ColumnSpec, MappedRow};
use contracts::domain::a004_fleet_vehicle::{FleetVehicle, FleetVehicleDto};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("plate", "Matrícula").with_alt("plate"),
        ColumnSpec::optional("brand", "Marca").with_alt("brand"),
        ColumnSpec::optional("model", "Modelo").with_alt("model"),
        ColumnSpec::optional("itv_due", "ITV").with_alt("itv_due"),
        ColumnSpec::optional("assigned_worker", "Conductor").with_alt("assigned_worker"),
        ColumnSpec::optional("status", "Estado").with_alt("status"),
    ]
}

pub fn dto_from_row(row: &MappedRow) -> Result<FleetVehicleDto, Vec<String>> {
    let mut reasons = Vec::new();

    let itv_due = match row["itv_due"].as_str() {
        "" => None,
        v => match parse_date(v) {
            Ok(date) => Some(date),
            Err(e) => {
                reasons.push(e);
                None
            }
        },
    };

    if !reasons.is_empty() {
        return Err(reasons);
    }

    let opt = |field: &str| -> Option<String> {
        let v = &row[field];
        if v.is_empty() {
            None
        } else {
            Some(v.clone())
        }
    };

    Ok(FleetVehicleDto {
        id: None,
        code: None,
        description: String::new(),
        comment: None,
        plate: Some(row["plate"].clone()),
        brand: opt("brand"),
        model: opt("model"),
        itv_due,
        assigned_worker_id: None,
        status: opt("status"),
    })
}

pub fn export_columns() -> Vec<ExportColumn<FleetVehicle>> {
    vec![
        ExportColumn::new("Matrícula", |v: &FleetVehicle| {
            CellValue::Text(v.plate.clone())
        }),
        ExportColumn::new("Marca", |v: &FleetVehicle| CellValue::Text(v.brand.clone())),
        ExportColumn::new("Modelo", |v: &FleetVehicle| {
            CellValue::Text(v.model.clone())
        }),
        ExportColumn::new("ITV", |v: &FleetVehicle| match v.itv_due {
            Some(date) => CellValue::Text(crate::shared::format::format_date(date)),
            None => CellValue::Empty,
        }),
        ExportColumn::new("Estado", |v: &FleetVehicle| {
            CellValue::Text(v.status.clone())
        }),
    ]
}
