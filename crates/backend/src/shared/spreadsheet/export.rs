use rust_xlsxwriter::{Format, Workbook};

/// Typed cell content for exports
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

/// One output column: header text plus a formatter over the record
pub struct ExportColumn<T> {
    pub header: &'static str,
    pub cell: fn(&T) -> CellValue,
}

impl<T> ExportColumn<T> {
    pub fn new(header: &'static str, cell: fn(&T) -> CellValue) -> Self {
        Self { header, cell }
    }
}

/// A finished export: workbook bytes plus the download filename
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Serialize records into a single-sheet workbook.
/// The filename is `<prefix>_<ISO-date>.xlsx`.
pub fn write_workbook<T>(
    records: &[T],
    columns: &[ExportColumn<T>],
    prefix: &str,
) -> anyhow::Result<ExportFile> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.header, &header_format)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            match (column.cell)(record) {
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, &s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    let filename = format!("{}_{}.xlsx", prefix, chrono::Utc::now().format("%Y-%m-%d"));
    Ok(ExportFile { filename, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::spreadsheet::import::{import_records, ColumnSpec};
    use crate::shared::spreadsheet::reader::read_sheet;

    struct Row {
        name: String,
        category: String,
        cost: f64,
    }

    fn columns() -> Vec<ExportColumn<Row>> {
        vec![
            ExportColumn::new("Nombre", |r: &Row| CellValue::Text(r.name.clone())),
            ExportColumn::new("Categoría", |r: &Row| CellValue::Text(r.category.clone())),
            ExportColumn::new("Coste", |r: &Row| CellValue::Number(r.cost)),
        ]
    }

    #[test]
    fn test_filename_carries_prefix_and_date() {
        let file = write_workbook::<Row>(&[], &columns(), "maquinaria").unwrap();
        assert!(file.filename.starts_with("maquinaria_"));
        assert!(file.filename.ends_with(".xlsx"));
        assert!(!file.bytes.is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let records = vec![
            Row {
                name: "Grúa torre".into(),
                category: "Equipos".into(),
                cost: 1850.5,
            },
            Row {
                name: "Hormigonera".into(),
                category: "Equipos".into(),
                cost: 320.0,
            },
        ];
        let file = write_workbook(&records, &columns(), "maquinaria").unwrap();

        let sheet = read_sheet(&file.filename, &file.bytes).unwrap();
        let specs = vec![
            ColumnSpec::required("name", "Nombre"),
            ColumnSpec::optional("category", "Categoría"),
            ColumnSpec::optional("cost", "Coste"),
        ];
        let round: Vec<(String, String, f64)> = import_records(&sheet, &specs, |m| {
            let cost = crate::shared::spreadsheet::import::parse_amount(&m["cost"])
                .map_err(|e| vec![e])?;
            Ok((m["name"].clone(), m["category"].clone(), cost))
        })
        .unwrap();

        assert_eq!(round.len(), records.len());
        for (got, want) in round.iter().zip(&records) {
            assert_eq!(got.0, want.name);
            assert_eq!(got.1, want.category);
            assert_eq!(got.2, want.cost);
        }
    }
}
