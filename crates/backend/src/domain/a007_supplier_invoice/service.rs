use super::repository;
use contracts::domain::a007_supplier_invoice::{SupplierInvoice, SupplierInvoiceDto};
use uuid::Uuid;

pub async fn create(dto: SupplierInvoiceDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("FAC-{}", Uuid::new_v4()));
    let mut aggregate = SupplierInvoice::new_for_insert(
        code,
        dto.description,
        dto.supplier_id,
        dto.invoice_number.unwrap_or_default(),
        dto.issue_date,
        dto.base_amount,
        dto.iva_rate.unwrap_or(21.0),
        dto.comment,
    );
    aggregate.paid = dto.paid;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.recompute();
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: SupplierInvoiceDto) -> anyhow::Result<()> {
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
    aggregate.recompute();
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SupplierInvoice>> {
    repository::get_by_id(id).await
}

pub async fn list(
    supplier_id: Option<&str>,
    paid: Option<bool>,
) -> anyhow::Result<Vec<SupplierInvoice>> {
    let items = match supplier_id {
        Some(sid) if !sid.is_empty() => repository::list_by_supplier(sid).await?,
        _ => repository::list_all().await?,
    };
    Ok(items
        .into_iter()
        .filter(|i| paid.map_or(true, |p| i.paid == p))
        .collect())
}

pub async fn mark_paid(id: Uuid, paid: bool) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;
    aggregate.paid = paid;
    aggregate.before_write();
    repository::update(&aggregate).await
}
