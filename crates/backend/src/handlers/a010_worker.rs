use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a010_worker::{self, service::PayrollResult};
use contracts::domain::a010_worker::{Worker, WorkerDto};

#[derive(Deserialize)]
pub struct WorkerListParams {
    pub q: Option<String>,
    pub active: Option<bool>,
}

/// GET /api/workers?q=&active=
pub async fn list(
    Query(params): Query<WorkerListParams>,
) -> Result<Json<Vec<Worker>>, axum::http::StatusCode> {
    match a010_worker::service::list(params.q.as_deref(), params.active).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list workers: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/workers/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Worker>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a010_worker::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load worker {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/workers
pub async fn upsert(
    Json(dto): Json<WorkerDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a010_worker::service::update(dto).await.map(|_| id)
    } else {
        a010_worker::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save worker: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/workers/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a010_worker::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete worker {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Deserialize)]
pub struct PayrollParams {
    pub hours: f64,
}

/// GET /api/workers/:id/payroll?hours=
pub async fn payroll(
    Path(id): Path<String>,
    Query(params): Query<PayrollParams>,
) -> Result<Json<PayrollResult>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => {
            return Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid worker id"})),
            ))
        }
    };
    match a010_worker::service::payroll(uuid, params.hours).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Payroll computation failed for {}: {}", id, error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}
