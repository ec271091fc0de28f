//! Bidirectional mapping between spreadsheet files and typed records.
//!
//! Import reads the first worksheet of an `.xlsx`/`.xls`/`.csv` file into
//! rows keyed by header text, maps them through caller-supplied column
//! specs (with an alternate-spelling fallback for localized headers) and
//! validates required fields across the whole batch before anything is
//! inserted. Export is the inverse: a column list turns records into a
//! single-sheet workbook named `<prefix>_<ISO-date>.xlsx`.

pub mod export;
pub mod import;
pub mod reader;

pub use export::{CellValue, ExportColumn, ExportFile};
pub use import::{ColumnSpec, ImportError, ImportOutcome, RowError};
pub use reader::{ParsedSheet, SpreadsheetError};
