use chrono::Utc;
use contracts::domain::a006_supplier_contract::{SupplierContract, SupplierContractId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_supplier_contract")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub supplier_id: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub monthly_amount: f64,
    pub signed: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplierContract {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        SupplierContract {
            base: BaseAggregate::with_metadata(
                SupplierContractId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            supplier_id: m.supplier_id,
            start_date: m.start_date,
            end_date: m.end_date,
            monthly_amount: m.monthly_amount,
            signed: m.signed,
        }
    }
}

fn active_from(aggregate: &SupplierContract) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        supplier_id: Set(aggregate.supplier_id.clone()),
        start_date: Set(aggregate.start_date),
        end_date: Set(aggregate.end_date),
        monthly_amount: Set(aggregate.monthly_amount),
        signed: Set(aggregate.signed),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<SupplierContract>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::StartDate)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_supplier(supplier_id: &str) -> anyhow::Result<Vec<SupplierContract>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::SupplierId.eq(supplier_id))
        .order_by_desc(Column::StartDate)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SupplierContract>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &SupplierContract) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &SupplierContract) -> anyhow::Result<()> {
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
