//! Derived financial figures used across certifications, supplier invoices,
//! machinery profitability and payroll.
//!
//! All monetary results are rounded to whole cents (half away from zero).
//! Percentages are expressed in percentage points, so `iva_rate = 21.0`
//! means 21%.

use serde::{Deserialize, Serialize};

/// Round a monetary amount to 2 decimal places, half away from zero
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Tax, retention and net figures derived from a base amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialBreakdown {
    #[serde(rename = "baseAmount")]
    pub base_amount: f64,
    #[serde(rename = "ivaAmount")]
    pub iva_amount: f64,
    #[serde(rename = "retentionAmount")]
    pub retention_amount: f64,
    #[serde(rename = "netAmount")]
    pub net_amount: f64,
}

impl FinancialBreakdown {
    /// Compute IVA, contract retention and net amount from a base amount.
    ///
    /// `net = base + iva − retention`. Rates are percentage points.
    pub fn from_base(base_amount: f64, iva_rate: f64, retention_rate: f64) -> Self {
        let iva_amount = round_cents(base_amount * iva_rate / 100.0);
        let retention_amount = round_cents(base_amount * retention_rate / 100.0);
        let net_amount = round_cents(base_amount + iva_amount - retention_amount);
        Self {
            base_amount: round_cents(base_amount),
            iva_amount,
            retention_amount,
            net_amount,
        }
    }
}

/// One period entry feeding the running accumulated total of a project
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodEntry {
    pub issue_date: chrono::NaiveDate,
    pub base_amount: f64,
}

/// Running accumulated totals over a project's certification history.
///
/// The caller passes the project's entries; they are sorted by issue date
/// here so the result does not depend on query order. Returns one
/// accumulated value per input entry, in chronological order. The first
/// entry accumulates from zero.
pub fn accumulate(entries: &[PeriodEntry]) -> Vec<f64> {
    let mut sorted: Vec<&PeriodEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.issue_date);

    let mut running = 0.0;
    sorted
        .iter()
        .map(|e| {
            running = round_cents(running + e.base_amount);
            running
        })
        .collect()
}

/// Accumulated amount for a new entry given the project's prior entries
pub fn accumulated_for_new(prior: &[PeriodEntry], base_amount: f64) -> f64 {
    let previous = accumulate(prior).last().copied().unwrap_or(0.0);
    round_cents(previous + base_amount)
}

/// Monthly costs-vs-revenue rollup for one machine or project
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitSummary {
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "totalCosts")]
    pub total_costs: f64,
    #[serde(rename = "grossProfit")]
    pub gross_profit: f64,
    #[serde(rename = "marginPct")]
    pub margin_pct: f64,
    #[serde(rename = "isProfitable")]
    pub is_profitable: bool,
}

impl ProfitSummary {
    /// Zero revenue yields a 0% margin regardless of costs.
    /// Zero gross profit counts as profitable.
    pub fn new(total_revenue: f64, total_costs: f64) -> Self {
        let gross_profit = round_cents(total_revenue - total_costs);
        let margin_pct = if total_revenue == 0.0 {
            0.0
        } else {
            round_cents(gross_profit / total_revenue * 100.0)
        };
        Self {
            total_revenue: round_cents(total_revenue),
            total_costs: round_cents(total_costs),
            gross_profit,
            margin_pct,
            is_profitable: gross_profit >= 0.0,
        }
    }
}

/// IRPF withholding over a gross payroll amount: (withheld, net)
pub fn payroll_net(gross: f64, irpf_rate: f64) -> (f64, f64) {
    let withheld = round_cents(gross * irpf_rate / 100.0);
    (withheld, round_cents(gross - withheld))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_breakdown_standard_rates() {
        let b = FinancialBreakdown::from_base(1000.0, 21.0, 5.0);
        assert_eq!(b.iva_amount, 210.0);
        assert_eq!(b.retention_amount, 50.0);
        assert_eq!(b.net_amount, 1160.0);
    }

    #[test]
    fn test_breakdown_zero_rates() {
        let b = FinancialBreakdown::from_base(500.0, 0.0, 0.0);
        assert_eq!(b.iva_amount, 0.0);
        assert_eq!(b.retention_amount, 0.0);
        assert_eq!(b.net_amount, 500.0);
    }

    #[test]
    fn test_breakdown_rounds_to_cents() {
        // 333.33 * 21% = 69.9993 -> 70.00
        let b = FinancialBreakdown::from_base(333.33, 21.0, 0.0);
        assert_eq!(b.iva_amount, 70.0);
        assert_eq!(b.net_amount, 403.33);
    }

    #[test]
    fn test_accumulate_running_sum() {
        let entries = [
            PeriodEntry {
                issue_date: d(2026, 1, 31),
                base_amount: 1000.0,
            },
            PeriodEntry {
                issue_date: d(2026, 2, 28),
                base_amount: 2500.0,
            },
            PeriodEntry {
                issue_date: d(2026, 3, 31),
                base_amount: 500.0,
            },
        ];
        assert_eq!(accumulate(&entries), vec![1000.0, 3500.0, 4000.0]);
    }

    #[test]
    fn test_accumulate_sorts_by_issue_date() {
        let entries = [
            PeriodEntry {
                issue_date: d(2026, 3, 31),
                base_amount: 500.0,
            },
            PeriodEntry {
                issue_date: d(2026, 1, 31),
                base_amount: 1000.0,
            },
        ];
        assert_eq!(accumulate(&entries), vec![1000.0, 1500.0]);
    }

    #[test]
    fn test_accumulate_monotonic_for_non_negative_bases() {
        let entries: Vec<PeriodEntry> = (1..=12)
            .map(|m| PeriodEntry {
                issue_date: d(2026, m, 1),
                base_amount: (m as f64) * 100.0,
            })
            .collect();
        let totals = accumulate(&entries);
        for w in totals.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_accumulated_for_new_first_record() {
        assert_eq!(accumulated_for_new(&[], 1200.0), 1200.0);
    }

    #[test]
    fn test_accumulated_for_new_with_history() {
        let prior = [
            PeriodEntry {
                issue_date: d(2026, 1, 31),
                base_amount: 1000.0,
            },
            PeriodEntry {
                issue_date: d(2026, 2, 28),
                base_amount: 2000.0,
            },
        ];
        assert_eq!(accumulated_for_new(&prior, 500.0), 3500.0);
    }

    #[test]
    fn test_profit_summary() {
        let p = ProfitSummary::new(10000.0, 7500.0);
        assert_eq!(p.gross_profit, 2500.0);
        assert_eq!(p.margin_pct, 25.0);
        assert!(p.is_profitable);
    }

    #[test]
    fn test_profit_margin_guards_zero_revenue() {
        let p = ProfitSummary::new(0.0, 4200.0);
        assert_eq!(p.margin_pct, 0.0);
        assert_eq!(p.gross_profit, -4200.0);
        assert!(!p.is_profitable);
    }

    #[test]
    fn test_zero_gross_profit_counts_as_profitable() {
        let p = ProfitSummary::new(3000.0, 3000.0);
        assert_eq!(p.gross_profit, 0.0);
        assert!(p.is_profitable);
    }

    #[test]
    fn test_payroll_net() {
        let (withheld, net) = payroll_net(2000.0, 15.0);
        assert_eq!(withheld, 300.0);
        assert_eq!(net, 1700.0);
    }
}
