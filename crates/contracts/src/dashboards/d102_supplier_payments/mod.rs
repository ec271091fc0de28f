pub mod dto;

pub use dto::{SupplierPaymentsRequest, SupplierPaymentsRow};
