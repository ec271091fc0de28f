use anyhow::Result;
use contracts::dashboards::d100_monthly_costs::PeriodRange;
use contracts::dashboards::d101_machinery_profitability::{
    MachineryProfitabilityRequest, MachineryProfitabilityRow,
};
use contracts::shared::finance::ProfitSummary;

use super::repository::{self, MachineRow};

/// Costs vs. certified revenue per machine for one calendar month.
/// Month revenue is spread evenly over all active machines before any
/// filtering, so a single machine reports the same figures whether it is
/// requested alone or as part of the full listing.
pub async fn get_machinery_profitability(
    request: MachineryProfitabilityRequest,
) -> Result<Vec<MachineryProfitabilityRow>> {
    let range = PeriodRange::for_month(request.year, request.month);

    let machines = repository::machine_costs(&range.date_from, &range.date_to).await?;
    let total_revenue = repository::certified_revenue(&range.date_from, &range.date_to).await?;

    Ok(build_rows(
        machines,
        total_revenue,
        request.machinery_id.as_deref(),
        request.year,
        request.month,
    ))
}

fn build_rows(
    machines: Vec<MachineRow>,
    total_revenue: f64,
    machinery_id: Option<&str>,
    year: i32,
    month: u32,
) -> Vec<MachineryProfitabilityRow> {
    if machines.is_empty() {
        return Vec::new();
    }
    let revenue_share = total_revenue / machines.len() as f64;

    machines
        .into_iter()
        .filter(|m| machinery_id.map_or(true, |id| m.machinery_id == id))
        .map(|m| {
            let summary = ProfitSummary::new(revenue_share, m.monthly_rental_cost);
            MachineryProfitabilityRow {
                machinery_id: m.machinery_id,
                machinery_name: m.machinery_name,
                year,
                month,
                summary,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(id: &str, cost: f64) -> MachineRow {
        MachineRow {
            machinery_id: id.to_string(),
            machinery_name: format!("Máquina {}", id),
            monthly_rental_cost: cost,
            incident_count: 0,
        }
    }

    #[test]
    fn test_filtered_machine_matches_unfiltered_figures() {
        let machines = vec![
            machine("m1", 500.0),
            machine("m2", 800.0),
            machine("m3", 300.0),
        ];
        let all = build_rows(machines.clone(), 3000.0, None, 2026, 4);
        let only_m2 = build_rows(machines, 3000.0, Some("m2"), 2026, 4);

        assert_eq!(all.len(), 3);
        assert_eq!(only_m2.len(), 1);
        let m2_in_all = all.iter().find(|r| r.machinery_id == "m2").unwrap();
        assert_eq!(
            only_m2[0].summary.total_revenue,
            m2_in_all.summary.total_revenue
        );
        assert_eq!(only_m2[0].summary.margin_pct, m2_in_all.summary.margin_pct);
        // the share is over all three machines, not over the single result
        assert_eq!(only_m2[0].summary.total_revenue, 1000.0);
    }

    #[test]
    fn test_no_machines_yields_no_rows() {
        assert!(build_rows(Vec::new(), 3000.0, None, 2026, 4).is_empty());
    }
}
