use axum::extract::{Multipart, Path, Query};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::excel::{export_response, import_response, sheet_from_multipart};
use crate::domain::a005_certification;
use contracts::domain::a005_certification::{Certification, CertificationDto};

#[derive(Deserialize)]
pub struct CertificationListParams {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
}

/// GET /api/certifications?projectId=
pub async fn list(
    Query(params): Query<CertificationListParams>,
) -> Result<Json<Vec<Certification>>, axum::http::StatusCode> {
    match a005_certification::service::list(params.project_id.as_deref()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list certifications: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/certifications/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<Certification>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_certification::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load certification {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/certifications
pub async fn upsert(
    Json(dto): Json<CertificationDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a005_certification::service::update(dto).await.map(|_| id)
    } else {
        a005_certification::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save certification: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/certifications/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a005_certification::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete certification {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/certifications/import-excel
pub async fn import_excel(mut multipart: Multipart) -> Response {
    let sheet = match sheet_from_multipart(&mut multipart).await {
        Ok(sheet) => sheet,
        Err(e) => return e.into_response(),
    };
    match a005_certification::service::import_sheet(&sheet).await {
        Ok(outcome) => import_response(outcome),
        Err(e) => {
            tracing::error!("Certification import failed: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/certifications/export-excel?projectId=
pub async fn export_excel(
    Query(params): Query<CertificationListParams>,
) -> Result<Response, axum::http::StatusCode> {
    match a005_certification::service::export_excel(params.project_id.as_deref()).await {
        Ok(file) => Ok(export_response(file)),
        Err(e) => {
            tracing::error!("Certification export failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
