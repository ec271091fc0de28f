use axum::extract::{Multipart, Path, Query};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::excel::{export_response, import_response, sheet_from_multipart};
use crate::domain::a003_machinery;
use contracts::domain::a003_machinery::{Machinery, MachineryDto};

#[derive(Deserialize)]
pub struct MachineryListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// GET /api/machinery
pub async fn list(
    Query(params): Query<MachineryListParams>,
) -> Result<Json<Vec<Machinery>>, axum::http::StatusCode> {
    match a003_machinery::service::list(
        params.q.as_deref(),
        params.category.as_deref(),
        params.status.as_deref(),
    )
    .await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list machinery: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/machinery/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Machinery>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a003_machinery::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load machinery {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/machinery
pub async fn upsert(
    Json(dto): Json<MachineryDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a003_machinery::service::update(dto).await.map(|_| id)
    } else {
        a003_machinery::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save machinery: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/machinery/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a003_machinery::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete machinery {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/machinery/import-excel
pub async fn import_excel(mut multipart: Multipart) -> Response {
    let sheet = match sheet_from_multipart(&mut multipart).await {
        Ok(sheet) => sheet,
        Err(e) => return e.into_response(),
    };
    match a003_machinery::service::import_sheet(&sheet).await {
        Ok(outcome) => import_response(outcome),
        Err(e) => {
            tracing::error!("Machinery import failed: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/machinery/export-excel
pub async fn export_excel() -> Result<Response, axum::http::StatusCode> {
    match a003_machinery::service::export_excel().await {
        Ok(file) => Ok(export_response(file)),
        Err(e) => {
            tracing::error!("Machinery export failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
