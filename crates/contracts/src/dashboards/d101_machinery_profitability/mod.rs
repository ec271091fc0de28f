pub mod dto;

pub use dto::{MachineryProfitabilityRequest, MachineryProfitabilityRow};
