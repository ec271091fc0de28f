use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a006_supplier_contract;
use contracts::domain::a006_supplier_contract::{SupplierContract, SupplierContractDto};

#[derive(Deserialize)]
pub struct SupplierContractListParams {
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<String>,
}

/// GET /api/supplier-contracts?supplierId=
pub async fn list(
    Query(params): Query<SupplierContractListParams>,
) -> Result<Json<Vec<SupplierContract>>, axum::http::StatusCode> {
    match a006_supplier_contract::service::list(params.supplier_id.as_deref()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list supplier contracts: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/supplier-contracts/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<SupplierContract>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_supplier_contract::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load supplier contract {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/supplier-contracts
pub async fn upsert(
    Json(dto): Json<SupplierContractDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a006_supplier_contract::service::update(dto).await.map(|_| id)
    } else {
        a006_supplier_contract::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save supplier contract: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/supplier-contracts/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_supplier_contract::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete supplier contract {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
