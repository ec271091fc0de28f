use super::repository;
use contracts::domain::a010_worker::{Worker, WorkerDto};
use serde::Serialize;
use uuid::Uuid;

pub async fn create(dto: WorkerDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("TRB-{}", Uuid::new_v4()));
    let mut aggregate = Worker::new_for_insert(
        code,
        dto.description,
        dto.dni.unwrap_or_default(),
        dto.trade.unwrap_or_default(),
        dto.hourly_cost.unwrap_or(0.0),
        dto.irpf_rate.unwrap_or(0.0),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: WorkerDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Worker>> {
    repository::get_by_id(id).await
}

pub async fn list(search: Option<&str>, active: Option<bool>) -> anyhow::Result<Vec<Worker>> {
    let items = repository::list_all().await?;
    Ok(items
        .into_iter()
        .filter(|w| matches_filters(w, search, active))
        .collect())
}

fn matches_filters(worker: &Worker, search: Option<&str>, active: Option<bool>) -> bool {
    if let Some(q) = search {
        let q = q.to_lowercase();
        if !q.is_empty()
            && !worker.base.description.to_lowercase().contains(&q)
            && !worker.dni.to_lowercase().contains(&q)
            && !worker.trade.to_lowercase().contains(&q)
        {
            return false;
        }
    }
    if let Some(a) = active {
        if worker.active != a {
            return false;
        }
    }
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollResult {
    pub worker_id: String,
    pub worker_name: String,
    pub hours: f64,
    pub gross: f64,
    pub withheld: f64,
    pub net: f64,
}

/// Payroll figures for one worker and a number of worked hours
pub async fn payroll(id: Uuid, hours: f64) -> anyhow::Result<PayrollResult> {
    if hours < 0.0 {
        anyhow::bail!("Las horas no pueden ser negativas");
    }
    let worker = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;
    let (gross, withheld, net) = worker.payroll_for_hours(hours);
    Ok(PayrollResult {
        worker_id: worker.base.id.value().to_string(),
        worker_name: worker.base.description.clone(),
        hours,
        gross,
        withheld,
        net,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(name: &str, dni: &str, trade: &str, active: bool) -> Worker {
        let mut w = Worker::new_for_insert(
            "TRB-001".into(),
            name.into(),
            dni.into(),
            trade.into(),
            18.5,
            12.0,
            None,
        );
        w.active = active;
        w
    }

    #[test]
    fn test_search_matches_name_dni_and_trade() {
        let w = worker("María López", "87654321X", "Gruista", true);
        assert!(matches_filters(&w, Some("maría"), None));
        assert!(matches_filters(&w, Some("87654321x"), None));
        assert!(matches_filters(&w, Some("gruista"), None));
        assert!(!matches_filters(&w, Some("soldador"), None));
    }

    #[test]
    fn test_active_facet() {
        let w = worker("María López", "87654321X", "Gruista", false);
        assert!(matches_filters(&w, None, Some(false)));
        assert!(!matches_filters(&w, None, Some(true)));
    }
}
