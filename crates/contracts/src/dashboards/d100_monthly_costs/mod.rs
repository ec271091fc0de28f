pub mod dto;

pub use dto::{MonthlyCostsRequest, MonthlyCostsResponse, MonthlyCostsRow, PeriodRange};
