use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::handlers::excel::IMPORT_BODY_LIMIT;
use crate::shared::config::Config;
use crate::system::mail::handlers::APPLICATION_BODY_LIMIT;
use crate::{handlers, system};

/// All application routes
pub fn configure_routes(config: Config) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CATALOG ROUTES
        // ========================================
        .route(
            "/api/projects",
            get(handlers::a001_project::list).post(handlers::a001_project::upsert),
        )
        .route(
            "/api/projects/:id",
            get(handlers::a001_project::get_by_id).delete(handlers::a001_project::delete),
        )
        // Supplier handlers
        .route(
            "/api/suppliers",
            get(handlers::a002_supplier::list).post(handlers::a002_supplier::upsert),
        )
        .route(
            "/api/suppliers/import-excel",
            post(handlers::a002_supplier::import_excel)
                .layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route(
            "/api/suppliers/export-excel",
            get(handlers::a002_supplier::export_excel),
        )
        .route(
            "/api/suppliers/:id",
            get(handlers::a002_supplier::get_by_id).delete(handlers::a002_supplier::delete),
        )
        // Machinery handlers
        .route(
            "/api/machinery",
            get(handlers::a003_machinery::list).post(handlers::a003_machinery::upsert),
        )
        .route(
            "/api/machinery/import-excel",
            post(handlers::a003_machinery::import_excel)
                .layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route(
            "/api/machinery/export-excel",
            get(handlers::a003_machinery::export_excel),
        )
        .route(
            "/api/machinery/:id",
            get(handlers::a003_machinery::get_by_id).delete(handlers::a003_machinery::delete),
        )
        // Fleet vehicle handlers
        .route(
            "/api/fleet-vehicles",
            get(handlers::a004_fleet_vehicle::list).post(handlers::a004_fleet_vehicle::upsert),
        )
        .route(
            "/api/fleet-vehicles/import-excel",
            post(handlers::a004_fleet_vehicle::import_excel)
                .layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route(
            "/api/fleet-vehicles/export-excel",
            get(handlers::a004_fleet_vehicle::export_excel),
        )
        .route(
            "/api/fleet-vehicles/:id",
            get(handlers::a004_fleet_vehicle::get_by_id).delete(handlers::a004_fleet_vehicle::delete),
        )
        // ========================================
        // CERTIFICATION ROUTES
        // ========================================
        .route(
            "/api/certifications",
            get(handlers::a005_certification::list).post(handlers::a005_certification::upsert),
        )
        .route(
            "/api/certifications/import-excel",
            post(handlers::a005_certification::import_excel)
                .layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route(
            "/api/certifications/export-excel",
            get(handlers::a005_certification::export_excel),
        )
        .route(
            "/api/certifications/:id",
            get(handlers::a005_certification::get_by_id).delete(handlers::a005_certification::delete),
        )
        // ========================================
        // SUPPLIER COST CONTROL ROUTES
        // ========================================
        .route(
            "/api/supplier-contracts",
            get(handlers::a006_supplier_contract::list).post(handlers::a006_supplier_contract::upsert),
        )
        .route(
            "/api/supplier-contracts/:id",
            get(handlers::a006_supplier_contract::get_by_id)
                .delete(handlers::a006_supplier_contract::delete),
        )
        .route(
            "/api/supplier-invoices",
            get(handlers::a007_supplier_invoice::list).post(handlers::a007_supplier_invoice::upsert),
        )
        .route(
            "/api/supplier-invoices/:id",
            get(handlers::a007_supplier_invoice::get_by_id)
                .delete(handlers::a007_supplier_invoice::delete),
        )
        .route(
            "/api/supplier-invoices/:id/paid",
            put(handlers::a007_supplier_invoice::mark_paid),
        )
        .route(
            "/api/supplier-payments",
            get(handlers::a008_supplier_payment::list).post(handlers::a008_supplier_payment::upsert),
        )
        .route(
            "/api/supplier-payments/:id",
            get(handlers::a008_supplier_payment::get_by_id)
                .delete(handlers::a008_supplier_payment::delete),
        )
        // Incident handlers
        .route(
            "/api/incidents",
            get(handlers::a009_incident::list).post(handlers::a009_incident::upsert),
        )
        .route(
            "/api/incidents/:id",
            get(handlers::a009_incident::get_by_id).delete(handlers::a009_incident::delete),
        )
        .route(
            "/api/incidents/:id/resolve",
            put(handlers::a009_incident::resolve),
        )
        // ========================================
        // WORKER AND PAYROLL ROUTES
        // ========================================
        .route(
            "/api/workers",
            get(handlers::a010_worker::list).post(handlers::a010_worker::upsert),
        )
        .route(
            "/api/workers/:id",
            get(handlers::a010_worker::get_by_id).delete(handlers::a010_worker::delete),
        )
        .route(
            "/api/workers/:id/payroll",
            get(handlers::a010_worker::payroll),
        )
        // ========================================
        // DASHBOARD ROUTES
        // ========================================
        .route(
            "/api/dashboards/monthly-costs",
            get(handlers::dashboards::monthly_costs),
        )
        .route(
            "/api/dashboards/machinery-profitability",
            get(handlers::dashboards::machinery_profitability),
        )
        .route(
            "/api/dashboards/supplier-payments",
            get(handlers::dashboards::supplier_payments),
        )
        // ========================================
        // PUBLIC MAIL ROUTES
        // ========================================
        .route(
            "/api/submit-application",
            post(system::mail::handlers::submit_application)
                .layer(DefaultBodyLimit::max(APPLICATION_BODY_LIMIT)),
        )
        .route("/api/contact", post(system::mail::handlers::contact))
        .route("/api/health", get(system::mail::handlers::health))
        .with_state(config)
}
