pub mod aggregate;

pub use aggregate::{Machinery, MachineryDto, MachineryId};
