pub mod aggregate;

pub use aggregate::{Worker, WorkerDto, WorkerId};
