use super::repository;
use contracts::domain::a008_supplier_payment::{SupplierPayment, SupplierPaymentDto};
use uuid::Uuid;

pub async fn create(dto: SupplierPaymentDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PAG-{}", Uuid::new_v4()));
    let mut aggregate = SupplierPayment::new_for_insert(
        code,
        dto.description,
        dto.supplier_id,
        dto.year,
        dto.month,
        dto.amount,
        dto.payment_date,
        dto.method.unwrap_or_else(|| "Transferencia".to_string()),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: SupplierPaymentDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SupplierPayment>> {
    repository::get_by_id(id).await
}

pub async fn list(
    supplier_id: Option<&str>,
    year: Option<i32>,
) -> anyhow::Result<Vec<SupplierPayment>> {
    let items = match supplier_id {
        Some(sid) if !sid.is_empty() => repository::list_by_supplier(sid).await?,
        _ => repository::list_all().await?,
    };
    Ok(items
        .into_iter()
        .filter(|p| year.map_or(true, |y| p.year == y))
        .collect())
}
