use axum::extract::{Multipart, Path, Query};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::excel::{export_response, import_response, sheet_from_multipart};
use crate::domain::a002_supplier;
use contracts::domain::a002_supplier::{Supplier, SupplierDto};

#[derive(Deserialize)]
pub struct SupplierListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// GET /api/suppliers
pub async fn list(
    Query(params): Query<SupplierListParams>,
) -> Result<Json<Vec<Supplier>>, axum::http::StatusCode> {
    match a002_supplier::service::list(
        params.q.as_deref(),
        params.category.as_deref(),
        params.status.as_deref(),
    )
    .await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list suppliers: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/suppliers/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Supplier>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_supplier::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load supplier {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/suppliers
pub async fn upsert(
    Json(dto): Json<SupplierDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a002_supplier::service::update(dto).await.map(|_| id)
    } else {
        a002_supplier::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save supplier: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/suppliers/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_supplier::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete supplier {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/suppliers/import-excel
pub async fn import_excel(mut multipart: Multipart) -> Response {
    let sheet = match sheet_from_multipart(&mut multipart).await {
        Ok(sheet) => sheet,
        Err(e) => return e.into_response(),
    };
    match a002_supplier::service::import_sheet(&sheet).await {
        Ok(outcome) => import_response(outcome),
        Err(e) => {
            tracing::error!("Supplier import failed: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/suppliers/export-excel
pub async fn export_excel() -> Result<Response, axum::http::StatusCode> {
    match a002_supplier::service::export_excel().await {
        Ok(file) => Ok(export_response(file)),
        Err(e) => {
            tracing::error!("Supplier export failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
