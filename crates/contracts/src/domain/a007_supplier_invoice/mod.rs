pub mod aggregate;

pub use aggregate::{SupplierInvoice, SupplierInvoiceDto, SupplierInvoiceId};
