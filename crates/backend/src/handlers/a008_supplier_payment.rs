use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a008_supplier_payment;
use contracts::domain::a008_supplier_payment::{SupplierPayment, SupplierPaymentDto};

#[derive(Deserialize)]
pub struct SupplierPaymentListParams {
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<String>,
    pub year: Option<i32>,
}

/// GET /api/supplier-payments?supplierId=&year=
pub async fn list(
    Query(params): Query<SupplierPaymentListParams>,
) -> Result<Json<Vec<SupplierPayment>>, axum::http::StatusCode> {
    match a008_supplier_payment::service::list(params.supplier_id.as_deref(), params.year).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list supplier payments: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/supplier-payments/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<SupplierPayment>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a008_supplier_payment::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load supplier payment {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/supplier-payments
pub async fn upsert(
    Json(dto): Json<SupplierPaymentDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a008_supplier_payment::service::update(dto).await.map(|_| id)
    } else {
        a008_supplier_payment::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save supplier payment: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/supplier-payments/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a008_supplier_payment::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete supplier payment {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
