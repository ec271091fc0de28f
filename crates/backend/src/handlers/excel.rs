//! Shared plumbing for the spreadsheet endpoints

use axum::extract::Multipart;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::shared::spreadsheet::export::ExportFile;
use crate::shared::spreadsheet::import::ImportOutcome;
use crate::shared::spreadsheet::reader::{read_sheet, ParsedSheet};

/// Request body cap for spreadsheet uploads; axum's 2 MB default is too
/// small for real catalog files.
pub const IMPORT_BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Pull the uploaded file out of a multipart form and parse it
pub async fn sheet_from_multipart(
    multipart: &mut Multipart,
) -> Result<ParsedSheet, (StatusCode, Json<serde_json::Value>)> {
    while let Some(field) = multipart.next_field().await.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "formulario no válido"})),
        )
    })? {
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            continue;
        }
        let data = field.bytes().await.map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "no se ha podido leer el archivo"})),
            )
        })?;
        return read_sheet(&filename, &data).map_err(|e| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"error": e.to_string()})),
            )
        });
    }
    Err((
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "falta el archivo"})),
    ))
}

/// 200 with the inserted count, 422 with the row report
pub fn import_response(outcome: ImportOutcome) -> Response {
    match &outcome {
        ImportOutcome::Inserted { .. } => Json(outcome).into_response(),
        ImportOutcome::Rejected { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(outcome)).into_response()
        }
    }
}

/// Stream a generated workbook as an attachment
pub fn export_response(file: ExportFile) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}
