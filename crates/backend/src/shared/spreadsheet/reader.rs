use calamine::{Data, Reader, Xls, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("formato de archivo no soportado: {0}")]
    UnsupportedFormat(String),
    #[error("el archivo no contiene ninguna hoja")]
    NoSheet,
    #[error("el archivo no contiene fila de cabeceras")]
    NoHeaderRow,
    #[error("error al leer el archivo: {0}")]
    Parse(String),
}

/// First worksheet of an uploaded file: header row + data rows keyed by
/// header text. Blank rows are skipped.
#[derive(Debug, Clone)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

/// Parse an uploaded spreadsheet. The format is chosen by file extension;
/// only the first sheet is read.
pub fn read_sheet(filename: &str, data: &[u8]) -> Result<ParsedSheet, SpreadsheetError> {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "xlsx" => {
            let wb = Xlsx::new(Cursor::new(data)).map_err(|e| SpreadsheetError::Parse(e.to_string()))?;
            read_first_sheet(wb)
        }
        "xls" => {
            let wb = Xls::new(Cursor::new(data)).map_err(|e| SpreadsheetError::Parse(e.to_string()))?;
            read_first_sheet(wb)
        }
        "csv" => read_csv(data),
        other => Err(SpreadsheetError::UnsupportedFormat(other.to_string())),
    }
}

fn read_first_sheet<RS, R>(mut wb: R) -> Result<ParsedSheet, SpreadsheetError>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_name = wb
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoSheet)?;
    let range = wb
        .worksheet_range(&sheet_name)
        .map_err(|e| SpreadsheetError::Parse(e.to_string()))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or(SpreadsheetError::NoHeaderRow)?;
    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();

    let mut rows = Vec::new();
    for row in rows_iter {
        let mut map = HashMap::new();
        let mut any = false;
        for (i, cell) in row.iter().enumerate() {
            let value = cell_to_string(cell);
            if !value.is_empty() {
                any = true;
            }
            if let Some(header) = headers.get(i) {
                if !header.is_empty() {
                    map.insert(header.clone(), value);
                }
            }
        }
        if any {
            rows.push(map);
        }
    }

    Ok(ParsedSheet { headers, rows })
}

/// Render a cell the way it displays: integers without a trailing ".0",
/// dates in ISO form.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

fn read_csv(data: &[u8]) -> Result<ParsedSheet, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SpreadsheetError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(SpreadsheetError::NoHeaderRow);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SpreadsheetError::Parse(e.to_string()))?;
        let mut map = HashMap::new();
        let mut any = false;
        for (i, field) in record.iter().enumerate() {
            let value = field.trim().to_string();
            if !value.is_empty() {
                any = true;
            }
            if let Some(header) = headers.get(i) {
                if !header.is_empty() {
                    map.insert(header.clone(), value);
                }
            }
        }
        if any {
            rows.push(map);
        }
    }

    Ok(ParsedSheet { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_first_row_is_header() {
        let data = b"Nombre,Categoria\nGrua torre,Equipos\n,\nHormigonera,Equipos\n";
        let sheet = read_sheet("maquinaria.csv", data).unwrap();
        assert_eq!(sheet.headers, vec!["Nombre", "Categoria"]);
        // the fully blank row is dropped
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0]["Nombre"], "Grua torre");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = read_sheet("datos.pdf", b"x").unwrap_err();
        assert!(matches!(err, SpreadsheetError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_xlsx_date_cell_reads_as_iso_date() {
        use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Fecha").unwrap();
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let date = ExcelDateTime::from_ymd(2026, 3, 31).unwrap();
        worksheet
            .write_datetime_with_format(1, 0, &date, &date_format)
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let sheet = read_sheet("certificaciones.xlsx", &bytes).unwrap();
        assert_eq!(sheet.rows[0]["Fecha"], "2026-03-31");
    }
}
