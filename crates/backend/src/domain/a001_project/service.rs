use super::repository;
use contracts::domain::a001_project::{Project, ProjectDto};
use uuid::Uuid;

pub async fn create(dto: ProjectDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("OBR-{}", Uuid::new_v4()));
    let mut aggregate = Project::new_for_insert(
        code,
        dto.description,
        dto.client_name.unwrap_or_default(),
        dto.site_address.unwrap_or_default(),
        dto.start_date,
        dto.retention_rate.unwrap_or(0.0),
        dto.status.unwrap_or_else(|| "Activa".to_string()),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ProjectDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Project>> {
    repository::get_by_id(id).await
}

pub async fn list(search: Option<&str>, status: Option<&str>) -> anyhow::Result<Vec<Project>> {
    let items = repository::list_all().await?;
    Ok(items
        .into_iter()
        .filter(|p| matches_filters(p, search, status))
        .collect())
}

fn matches_filters(project: &Project, search: Option<&str>, status: Option<&str>) -> bool {
    if let Some(q) = search {
        let q = q.to_lowercase();
        if !q.is_empty()
            && !project.base.description.to_lowercase().contains(&q)
            && !project.base.code.to_lowercase().contains(&q)
            && !project.client_name.to_lowercase().contains(&q)
        {
            return false;
        }
    }
    if let Some(st) = status {
        if !st.is_empty() && project.status != st {
            return false;
        }
    }
    true
}
