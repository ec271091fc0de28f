pub mod common;

pub mod a001_project;
pub mod a002_supplier;
pub mod a003_machinery;
pub mod a004_fleet_vehicle;
pub mod a005_certification;
pub mod a006_supplier_contract;
pub mod a007_supplier_invoice;
pub mod a008_supplier_payment;
pub mod a009_incident;
pub mod a010_worker;
