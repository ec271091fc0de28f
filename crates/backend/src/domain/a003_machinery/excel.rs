//! Column mapping between machinery spreadsheets and [`MachineryDto`]

use crate::shared::spreadsheet::export::{CellValue, ExportColumn};
use crate::shared::spreadsheet::import::{parse_amount, ColumnSpec, MappedRow};
use contracts::domain::a003_machinery::{Machinery, MachineryDto};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("name", "Nombre").with_alt("name"),
        ColumnSpec::optional("category", "Categoría").with_alt("category"),
        ColumnSpec::optional("plate_or_serial", "Matrícula/Serie").with_alt("plate_or_serial"),
        ColumnSpec::optional("monthly_rental_cost", "Coste Mensual").with_alt("monthly_rental_cost"),
        ColumnSpec::optional("status", "Estado").with_alt("status"),
    ]
}

pub fn dto_from_row(row: &MappedRow) -> Result<MachineryDto, Vec<String>> {
    let mut reasons = Vec::new();

    let monthly_rental_cost = match row["monthly_rental_cost"].as_str() {
        "" => None,
        v => match parse_amount(v) {
            Ok(amount) => Some(amount),
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

    Ok(MachineryDto {
        id: None,
        code: None,
        description: row["name"].clone(),
        comment: None,
        supplier_id: None,
        category: opt("category"),
        plate_or_serial: opt("plate_or_serial"),
        monthly_rental_cost,
        status: opt("status"),
    })
}

pub fn export_columns() -> Vec<ExportColumn<Machinery>> {
    vec![
        ExportColumn::new("Código", |m: &Machinery| {
            CellValue::Text(m.base.code.clone())
        }),
        ExportColumn::new("Nombre", |m: &Machinery| {
            CellValue::Text(m.base.description.clone())
        }),
        ExportColumn::new("Categoría", |m: &Machinery| {
            CellValue::Text(m.category.clone())
        }),
        ExportColumn::new("Matrícula/Serie", |m: &Machinery| {
            CellValue::Text(m.plate_or_serial.clone())
        }),
        ExportColumn::new("Coste Mensual", |m: &Machinery| {
            CellValue::Number(m.monthly_rental_cost)
        }),
        ExportColumn::new("Estado", |m: &Machinery| CellValue::Text(m.status.clone())),
    ]
}
