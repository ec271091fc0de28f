use serde::{Deserialize, Serialize};

/// Request for the monthly cost summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCostsRequest {
    pub year: i32,
    pub month: u32,
}

/// Date window of one calendar month, used by dashboard SQL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRange {
    /// "YYYY-MM-DD", first day of the month
    pub date_from: String,
    /// "YYYY-MM-DD", last day of the month
    pub date_to: String,
}

impl PeriodRange {
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            date_from: format!("{:04}-{:02}-01", year, month),
            date_to: format!("{:04}-{:02}-{:02}", year, month, last_day_of_month(year, month)),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Response for the monthly cost summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCostsResponse {
    /// Period in format "YYYY-MM"
    pub period: String,
    pub rows: Vec<MonthlyCostsRow>,
    /// Sum over all cost rows
    pub total_costs: f64,
    /// Certified revenue of the month
    pub total_revenue: f64,
}

/// One cost line in the monthly summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCostsRow {
    /// "invoices", "payments", "payroll" ...
    pub concept: String,
    /// Display name, e.g. "Facturas de proveedor"
    pub concept_name: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_range_for_month() {
        let r = PeriodRange::for_month(2026, 2);
        assert_eq!(r.date_from, "2026-02-01");
        assert_eq!(r.date_to, "2026-02-28");

        let leap = PeriodRange::for_month(2024, 2);
        assert_eq!(leap.date_to, "2024-02-29");

        let jan = PeriodRange::for_month(2026, 1);
        assert_eq!(jan.date_to, "2026-01-31");
    }
}
