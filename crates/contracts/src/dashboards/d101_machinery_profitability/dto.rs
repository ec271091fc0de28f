use crate::shared::finance::ProfitSummary;
use serde::{Deserialize, Serialize};

/// Request keyed the way the original aggregation procedure was:
/// machine (optional, all when absent) + year + month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryProfitabilityRequest {
    #[serde(rename = "machineryId")]
    pub machinery_id: Option<String>,
    pub year: i32,
    pub month: u32,
}

/// Per-machine, per-month costs vs. certified revenue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryProfitabilityRow {
    #[serde(rename = "machineryId")]
    pub machinery_id: String,
    #[serde(rename = "machineryName")]
    pub machinery_name: String,
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub summary: ProfitSummary,
}
