pub mod aggregate;

pub use aggregate::{SupplierContract, SupplierContractDto, SupplierContractId};
