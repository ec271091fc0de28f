use chrono::Utc;
use contracts::domain::a007_supplier_invoice::{SupplierInvoice, SupplierInvoiceId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_supplier_invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub supplier_id: String,
    pub invoice_number: String,
    pub issue_date: chrono::NaiveDate,
    pub base_amount: f64,
    pub iva_rate: f64,
    pub iva_amount: f64,
    pub total_amount: f64,
    pub paid: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplierInvoice {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        SupplierInvoice {
            base: BaseAggregate::with_metadata(
                SupplierInvoiceId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            supplier_id: m.supplier_id,
            invoice_number: m.invoice_number,
            issue_date: m.issue_date,
            base_amount: m.base_amount,
            iva_rate: m.iva_rate,
            iva_amount: m.iva_amount,
            total_amount: m.total_amount,
            paid: m.paid,
        }
    }
}

fn active_from(aggregate: &SupplierInvoice) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        supplier_id: Set(aggregate.supplier_id.clone()),
        invoice_number: Set(aggregate.invoice_number.clone()),
        issue_date: Set(aggregate.issue_date),
        base_amount: Set(aggregate.base_amount),
        iva_rate: Set(aggregate.iva_rate),
        iva_amount: Set(aggregate.iva_amount),
        total_amount: Set(aggregate.total_amount),
        paid: Set(aggregate.paid),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<SupplierInvoice>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::IssueDate)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_supplier(supplier_id: &str) -> anyhow::Result<Vec<SupplierInvoice>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::SupplierId.eq(supplier_id))
        .order_by_desc(Column::IssueDate)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SupplierInvoice>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &SupplierInvoice) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &SupplierInvoice) -> anyhow::Result<()> {
    let mut active = active_from(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
