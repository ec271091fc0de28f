use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a001_project;
use contracts::domain::a001_project::{Project, ProjectDto};

#[derive(Deserialize)]
pub struct ProjectListParams {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// GET /api/projects
pub async fn list(
    Query(params): Query<ProjectListParams>,
) -> Result<Json<Vec<Project>>, axum::http::StatusCode> {
    match a001_project::service::list(params.q.as_deref(), params.status.as_deref()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list projects: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/projects/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Project>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_project::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load project {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/projects
pub async fn upsert(
    Json(dto): Json<ProjectDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a001_project::service::update(dto).await.map(|_| id)
    } else {
        a001_project::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save project: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/projects/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_project::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete project {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
