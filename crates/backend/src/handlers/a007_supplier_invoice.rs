use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a007_supplier_invoice;
use contracts::domain::a007_supplier_invoice::{SupplierInvoice, SupplierInvoiceDto};

#[derive(Deserialize)]
pub struct SupplierInvoiceListParams {
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<String>,
    pub paid: Option<bool>,
}

/// GET /api/supplier-invoices?supplierId=&paid=
pub async fn list(
    Query(params): Query<SupplierInvoiceListParams>,
) -> Result<Json<Vec<SupplierInvoice>>, axum::http::StatusCode> {
    match a007_supplier_invoice::service::list(params.supplier_id.as_deref(), params.paid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list supplier invoices: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/supplier-invoices/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<SupplierInvoice>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_supplier_invoice::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load supplier invoice {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/supplier-invoices
pub async fn upsert(
    Json(dto): Json<SupplierInvoiceDto>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let result = if let Some(id) = dto.id.clone() {
        a007_supplier_invoice::service::update(dto).await.map(|_| id)
    } else {
        a007_supplier_invoice::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => {
            let error_msg = format!("{}", e);
            tracing::error!("Failed to save supplier invoice: {}", error_msg);
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": error_msg})),
            ))
        }
    }
}

/// DELETE /api/supplier-invoices/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_supplier_invoice::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete supplier invoice {}: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Deserialize)]
pub struct MarkPaidRequest {
    pub paid: bool,
}

/// PUT /api/supplier-invoices/:id/paid
pub async fn mark_paid(
    Path(id): Path<String>,
    Json(payload): Json<MarkPaidRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a007_supplier_invoice::service::mark_paid(uuid, payload.paid).await {
        Ok(()) => Ok(Json(json!({"id": id, "paid": payload.paid}))),
        Err(e) => {
            tracing::error!("Failed to mark supplier invoice {} paid: {}", id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
