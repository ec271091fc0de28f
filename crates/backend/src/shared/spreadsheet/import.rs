use super::reader::ParsedSheet;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// How one spreadsheet column maps onto a record field.
///
/// `alt_header` tolerates a second spelling of the same column, so files
/// exported with either localized or plain headers import cleanly.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Target field name in the mapped record
    pub field: &'static str,
    pub header: &'static str,
    pub alt_header: Option<&'static str>,
    pub required: bool,
}

impl ColumnSpec {
    pub fn required(field: &'static str, header: &'static str) -> Self {
        Self {
            field,
            header,
            alt_header: None,
            required: true,
        }
    }

    pub fn optional(field: &'static str, header: &'static str) -> Self {
        Self {
            field,
            header,
            alt_header: None,
            required: false,
        }
    }

    pub fn with_alt(mut self, alt_header: &'static str) -> Self {
        self.alt_header = Some(alt_header);
        self
    }
}

/// One rejected row: 1-based data row number plus every reason found
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub row: usize,
    pub reasons: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("el archivo no contiene filas de datos")]
    EmptySheet,
    /// The batch is rejected as a whole; no row was inserted
    #[error("{} fila(s) con errores, no se ha importado ninguna", .0.len())]
    InvalidRows(Vec<RowError>),
}

/// A row mapped onto target field names
pub type MappedRow = HashMap<&'static str, String>;

/// Outcome of an import request once the file itself parsed
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ImportOutcome {
    /// Every row was valid and the whole batch was inserted
    Inserted { count: usize },
    /// At least one row was invalid; nothing was inserted
    Rejected { errors: Vec<RowError> },
}

impl From<ImportError> for ImportOutcome {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::InvalidRows(errors) => ImportOutcome::Rejected { errors },
            other => ImportOutcome::Rejected {
                errors: vec![RowError {
                    row: 0,
                    reasons: vec![other.to_string()],
                }],
            },
        }
    }
}

fn lookup<'a>(row: &'a HashMap<String, String>, spec: &ColumnSpec) -> Option<&'a str> {
    row.get(spec.header)
        .or_else(|| spec.alt_header.and_then(|alt| row.get(alt)))
        .map(|s| s.as_str())
}

/// Map and validate every data row, then convert each through `transform`.
///
/// All-or-nothing: if any row misses a required field or fails to convert,
/// the whole batch is rejected and the error lists every offending row.
pub fn import_records<T, F>(
    sheet: &ParsedSheet,
    specs: &[ColumnSpec],
    transform: F,
) -> Result<Vec<T>, ImportError>
where
    F: Fn(&MappedRow) -> Result<T, Vec<String>>,
{
    if sheet.rows.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    let mut records = Vec::with_capacity(sheet.rows.len());
    let mut errors: Vec<RowError> = Vec::new();

    for (idx, row) in sheet.rows.iter().enumerate() {
        let mut reasons = Vec::new();
        let mut mapped: MappedRow = HashMap::new();

        for spec in specs {
            let value = lookup(row, spec).unwrap_or_default();
            if spec.required && value.trim().is_empty() {
                reasons.push(format!("falta el campo obligatorio '{}'", spec.field));
            }
            mapped.insert(spec.field, value.trim().to_string());
        }

        if reasons.is_empty() {
            match transform(&mapped) {
                Ok(record) => records.push(record),
                Err(mut transform_reasons) => reasons.append(&mut transform_reasons),
            }
        }

        if !reasons.is_empty() {
            errors.push(RowError {
                row: idx + 1,
                reasons,
            });
        }
    }

    if !errors.is_empty() {
        return Err(ImportError::InvalidRows(errors));
    }
    Ok(records)
}

/// Parse an amount written either as "1.234,56" (Spanish) or "1234.56"
pub fn parse_amount(value: &str) -> Result<f64, String> {
    let v = value.trim().trim_end_matches('€').trim();
    if v.is_empty() {
        return Ok(0.0);
    }
    let normalized = if v.contains(',') {
        v.replace('.', "").replace(',', ".")
    } else {
        v.to_string()
    };
    normalized
        .parse::<f64>()
        .map_err(|_| format!("importe no válido: '{}'", value))
}

/// Parse a date written either as "dd/mm/yyyy" or ISO "yyyy-mm-dd"
pub fn parse_date(value: &str) -> Result<chrono::NaiveDate, String> {
    let v = value.trim();
    chrono::NaiveDate::parse_from_str(v, "%d/%m/%Y")
        .or_else(|_| chrono::NaiveDate::parse_from_str(v, "%Y-%m-%d"))
        .map_err(|_| format!("fecha no válida: '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_from(rows: Vec<Vec<(&str, &str)>>) -> ParsedSheet {
        let rows: Vec<HashMap<String, String>> = rows
            .into_iter()
            .map(|r| {
                r.into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .collect();
        ParsedSheet {
            headers: vec![],
            rows,
        }
    }

    fn supplier_specs() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::required("commercial_name", "Nombre Comercial").with_alt("commercial_name"),
            ColumnSpec::optional("category", "Categoría").with_alt("category"),
        ]
    }

    #[test]
    fn test_one_bad_row_rejects_whole_batch() {
        let mut rows = Vec::new();
        for i in 1..=10 {
            if i == 7 {
                rows.push(vec![("Categoría", "Equipos")]);
            } else {
                rows.push(vec![("Nombre Comercial", "Proveedor SA"), ("Categoría", "Equipos")]);
            }
        }
        let sheet = sheet_from(rows);
        let result = import_records(&sheet, &supplier_specs(), |m| {
            Ok::<_, Vec<String>>(m["commercial_name"].clone())
        });
        match result {
            Err(ImportError::InvalidRows(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].row, 7);
                assert!(errors[0].reasons[0].contains("commercial_name"));
            }
            other => panic!("expected InvalidRows, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_alternate_header_fallback() {
        let sheet = sheet_from(vec![vec![("commercial_name", "Aridos del Norte")]]);
        let result = import_records(&sheet, &supplier_specs(), |m| {
            Ok::<_, Vec<String>>(m["commercial_name"].clone())
        })
        .unwrap();
        assert_eq!(result, vec!["Aridos del Norte".to_string()]);
    }

    #[test]
    fn test_transform_errors_are_row_errors() {
        let sheet = sheet_from(vec![
            vec![("Nombre Comercial", "Uno")],
            vec![("Nombre Comercial", "Dos")],
        ]);
        let result = import_records(&sheet, &supplier_specs(), |m| {
            if m["commercial_name"] == "Dos" {
                Err(vec!["importe no válido".to_string()])
            } else {
                Ok(())
            }
        });
        match result {
            Err(ImportError::InvalidRows(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].row, 2);
            }
            _ => panic!("expected InvalidRows"),
        }
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = sheet_from(vec![]);
        let result = import_records(&sheet, &supplier_specs(), |_| Ok::<_, Vec<String>>(()));
        assert!(matches!(result, Err(ImportError::EmptySheet)));
    }

    #[test]
    fn test_parse_amount_spanish_and_plain() {
        assert_eq!(parse_amount("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_amount("1234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("1000").unwrap(), 1000.0);
        assert_eq!(parse_amount("1.250,00 €").unwrap(), 1250.0);
        assert_eq!(parse_amount("").unwrap(), 0.0);
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_outcome_json_shape() {
        let inserted = serde_json::to_value(ImportOutcome::Inserted { count: 3 }).unwrap();
        assert_eq!(inserted["outcome"], "inserted");
        assert_eq!(inserted["count"], 3);

        let rejected = serde_json::to_value(ImportOutcome::Rejected {
            errors: vec![RowError {
                row: 2,
                reasons: vec!["importe no válido".to_string()],
            }],
        })
        .unwrap();
        assert_eq!(rejected["outcome"], "rejected");
        assert_eq!(rejected["errors"][0]["row"], 2);
    }

    #[test]
    fn test_parse_date_both_forms() {
        let expected = chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(parse_date("31/03/2026").unwrap(), expected);
        assert_eq!(parse_date("2026-03-31").unwrap(), expected);
        assert!(parse_date("31-03-2026").is_err());
    }
}
