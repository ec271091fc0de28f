//! Column mapping between certification spreadsheets and the import row

use crate::shared::spreadsheet::export::{CellValue, ExportColumn};
use crate::shared::spreadsheet::import::{parse_amount, parse_date, ColumnSpec, MappedRow};
use contracts::domain::a005_certification::Certification;

/// Intermediate import row. The project reference still needs resolving
/// against the project catalog, which the service does with the database
/// at hand.
#[derive(Debug, Clone)]
pub struct CertificationRow {
    pub project_ref: String,
    pub description: String,
    pub issue_date: chrono::NaiveDate,
    pub base_amount: f64,
    pub iva_rate: Option<f64>,
    pub retention_rate: Option<f64>,
}

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required("project", "Obra").with_alt("project"),
        ColumnSpec::optional("description", "Concepto").with_alt("description"),
        ColumnSpec::required("issue_date", "Fecha").with_alt("issue_date"),
        ColumnSpec::required("base_amount", "Importe Base").with_alt("base_amount"),
        ColumnSpec::optional("iva_rate", "IVA %").with_alt("iva_rate"),
        ColumnSpec::optional("retention_rate", "Retención %").with_alt("retention_rate"),
    ]
}

pub fn row_from_mapped(row: &MappedRow) -> Result<CertificationRow, Vec<String>> {
    let mut reasons = Vec::new();

    let issue_date = match parse_date(&row["issue_date"]) {
        Ok(date) => Some(date),
        Err(e) => {
            reasons.push(e);
            None
        }
    };
    let base_amount = match parse_amount(&row["base_amount"]) {
        Ok(amount) => Some(amount),
        Err(e) => {
            reasons.push(e);
            None
        }
    };
    let rate = |field: &str| -> Result<Option<f64>, String> {
        match row[field].as_str() {
            "" => Ok(None),
            v => parse_amount(v).map(Some),
        }
    };
    let iva_rate = match rate("iva_rate") {
        Ok(v) => v,
        Err(e) => {
            reasons.push(e);
            None
        }
    };
    let retention_rate = match rate("retention_rate") {
        Ok(v) => v,
        Err(e) => {
            reasons.push(e);
            None
        }
    };

    match (issue_date, base_amount) {
        (Some(issue_date), Some(base_amount)) if reasons.is_empty() => Ok(CertificationRow {
            project_ref: row["project"].clone(),
            description: row["description"].clone(),
            issue_date,
            base_amount,
            iva_rate,
            retention_rate,
        }),
        _ => Err(reasons),
    }
}

pub fn export_columns() -> Vec<ExportColumn<Certification>> {
    vec![
        ExportColumn::new("Código", |c: &Certification| {
            CellValue::Text(c.base.code.clone())
        }),
        ExportColumn::new("Obra", |c: &Certification| {
            CellValue::Text(c.project_id.clone())
        }),
        ExportColumn::new("Concepto", |c: &Certification| {
            CellValue::Text(c.base.description.clone())
        }),
        ExportColumn::new("Fecha", |c: &Certification| {
            CellValue::Text(crate::shared::format::format_date(c.issue_date))
        }),
        ExportColumn::new("Importe Base", |c: &Certification| {
            CellValue::Number(c.base_amount)
        }),
        ExportColumn::new("IVA", |c: &Certification| CellValue::Number(c.iva_amount)),
        ExportColumn::new("Retención", |c: &Certification| {
            CellValue::Number(c.retention_amount)
        }),
        ExportColumn::new("Líquido", |c: &Certification| {
            CellValue::Number(c.net_amount)
        }),
        ExportColumn::new("Acumulado", |c: &Certification| {
            CellValue::Number(c.accumulated_amount)
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn mapped(pairs: &[(&'static str, &str)]) -> MappedRow {
        let mut row: MappedRow = HashMap::new();
        for spec in column_specs() {
            row.insert(spec.field, String::new());
        }
        for (k, v) in pairs {
            row.insert(k, v.to_string());
        }
        row
    }

    #[test]
    fn test_spanish_amount_and_date() {
        let row = mapped(&[
            ("project", "OBR-001"),
            ("issue_date", "31/03/2026"),
            ("base_amount", "12.500,00 €"),
        ]);
        let parsed = row_from_mapped(&row).unwrap();
        assert_eq!(parsed.base_amount, 12500.0);
        assert_eq!(
            parsed.issue_date,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
        );
        assert!(parsed.iva_rate.is_none());
    }

    #[test]
    fn test_bad_date_and_amount_collects_both_reasons() {
        let row = mapped(&[
            ("project", "OBR-001"),
            ("issue_date", "pronto"),
            ("base_amount", "mucho"),
        ]);
        let reasons = row_from_mapped(&row).unwrap_err();
        assert_eq!(reasons.len(), 2);
    }
}
