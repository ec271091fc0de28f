use super::repository;
use contracts::domain::a006_supplier_contract::{SupplierContract, SupplierContractDto};
use uuid::Uuid;

pub async fn create(dto: SupplierContractDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CON-{}", Uuid::new_v4()));
    let mut aggregate = SupplierContract::new_for_insert(
        code,
        dto.description,
        dto.supplier_id,
        dto.start_date,
        dto.end_date,
        dto.monthly_amount.unwrap_or(0.0),
        dto.signed,
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: SupplierContractDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SupplierContract>> {
    repository::get_by_id(id).await
}

pub async fn list(supplier_id: Option<&str>) -> anyhow::Result<Vec<SupplierContract>> {
    match supplier_id {
        Some(sid) if !sid.is_empty() => repository::list_by_supplier(sid).await,
        _ => repository::list_all().await,
    }
}
