pub mod aggregate;

pub use aggregate::{SupplierPayment, SupplierPaymentDto, SupplierPaymentId};
