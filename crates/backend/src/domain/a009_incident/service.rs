use super::repository;
use contracts::domain::a009_incident::{Incident, IncidentDto};
use uuid::Uuid;

pub async fn create(dto: IncidentDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("INC-{}", Uuid::new_v4()));
    let mut aggregate = Incident::new_for_insert(
        code,
        dto.description,
        dto.vehicle_id,
        dto.machinery_id,
        dto.date,
        dto.severity.unwrap_or_else(|| "Leve".to_string()),
        dto.comment,
    );
    aggregate.resolved = dto.resolved;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: IncidentDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Incident>> {
    repository::get_by_id(id).await
}

pub async fn list(
    severity: Option<&str>,
    resolved: Option<bool>,
) -> anyhow::Result<Vec<Incident>> {
    let items = repository::list_all().await?;
    Ok(items
        .into_iter()
        .filter(|i| matches_filters(i, severity, resolved))
        .collect())
}

fn matches_filters(incident: &Incident, severity: Option<&str>, resolved: Option<bool>) -> bool {
    if let Some(sev) = severity {
        if !sev.is_empty() && incident.severity != sev {
            return false;
        }
    }
    if let Some(r) = resolved {
        if incident.resolved != r {
            return false;
        }
    }
    true
}

pub async fn resolve(id: Uuid) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;
    aggregate.resolved = true;
    aggregate.before_write();
    repository::update(&aggregate).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(severity: &str, resolved: bool) -> Incident {
        let mut i = Incident::new_for_insert(
            "INC-001".into(),
            "Pinchazo en obra".into(),
            Some("v-1".into()),
            None,
            chrono::NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            severity.into(),
            None,
        );
        i.resolved = resolved;
        i
    }

    #[test]
    fn test_severity_and_resolved_filters() {
        let grave = incident("Grave", false);
        assert!(matches_filters(&grave, Some("Grave"), Some(false)));
        assert!(!matches_filters(&grave, Some("Leve"), None));
        assert!(!matches_filters(&grave, None, Some(true)));
        assert!(matches_filters(&grave, None, None));
    }
}
