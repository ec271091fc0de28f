//! Column mapping between supplier spreadsheets and [`SupplierDto`]

use crate::shared::spreadsheet::export::{CellValue, ExportColumn};
use crate::shared::spreadsheet::import::{ColumnSpec, MappedRow};
use contracts::domain::a002_supplier::{Supplier, SupplierDto};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("commercial_name", "Nombre Comercial").with_alt("commercial_name"),
        ColumnSpec::optional("legal_name", "Razón Social").with_alt("legal_name"),
        ColumnSpec::optional("cif", "CIF").with_alt("cif"),
        ColumnSpec::optional("contact_email", "Email").with_alt("contact_email"),
        ColumnSpec::optional("phone", "Teléfono").with_alt("phone"),
        ColumnSpec::optional("category", "Categoría").with_alt("category"),
        ColumnSpec::optional("payment_terms_days", "Días de Pago").with_alt("payment_terms_days"),
        ColumnSpec::optional("status", "Estado").with_alt("status"),
    ]
}

pub fn dto_from_row(row: &MappedRow) -> Result<SupplierDto, Vec<String>> {
    let mut reasons = Vec::new();

    let payment_terms_days = match row["payment_terms_days"].as_str() {
        "" => None,
        v => match v.parse::<i32>() {
            Ok(days) => Some(days),
            Err(_) => {
                reasons.push(format!("días de pago no válidos: '{}'", v));
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

    Ok(SupplierDto {
        id: None,
        code: None,
        description: row["commercial_name"].clone(),
        comment: None,
        legal_name: opt("legal_name"),
        cif: opt("cif"),
        contact_email: opt("contact_email"),
        phone: opt("phone"),
        category: opt("category"),
        payment_terms_days,
        status: opt("status"),
    })
}

pub fn export_columns() -> Vec<ExportColumn<Supplier>> {
    vec![
        ExportColumn::new("Código", |s: &Supplier| {
            CellValue::Text(s.base.code.clone())
        }),
        ExportColumn::new("Nombre Comercial", |s: &Supplier| {
            CellValue::Text(s.base.description.clone())
        }),
        ExportColumn::new("Razón Social", |s: &Supplier| {
            CellValue::Text(s.legal_name.clone())
        }),
        ExportColumn::new("CIF", |s: &Supplier| CellValue::Text(s.cif.clone())),
        ExportColumn::new("Email", |s: &Supplier| {
            CellValue::Text(s.contact_email.clone())
        }),
        ExportColumn::new("Teléfono", |s: &Supplier| CellValue::Text(s.phone.clone())),
        ExportColumn::new("Categoría", |s: &Supplier| {
            CellValue::Text(s.category.clone())
        }),
        ExportColumn::new("Días de Pago", |s: &Supplier| {
            CellValue::Number(s.payment_terms_days as f64)
        }),
        ExportColumn::new("Estado", |s: &Supplier| CellValue::Text(s.status.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_dto_from_row_minimal() {
        let mut row: MappedRow = HashMap::new();
        for spec in column_specs() {
            row.insert(spec.field, String::new());
        }
        row.insert("commercial_name", "Áridos SA".into());
        row.insert("payment_terms_days", "60".into());

        let dto = dto_from_row(&row).unwrap();
        assert_eq!(dto.description, "Áridos SA");
        assert_eq!(dto.payment_terms_days, Some(60));
        assert_eq!(dto.cif, None);
    }

    #[test]
    fn test_dto_from_row_bad_number() {
        let mut row: MappedRow = HashMap::new();
        for spec in column_specs() {
            row.insert(spec.field, String::new());
        }
        row.insert("commercial_name", "Áridos SA".into());
        row.insert("payment_terms_days", "treinta".into());

        let reasons = dto_from_row(&row).unwrap_err();
        assert!(reasons[0].contains("treinta"));
    }
}
