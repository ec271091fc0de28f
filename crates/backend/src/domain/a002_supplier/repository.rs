use chrono::Utc;
use contracts::domain::a002_supplier::{Supplier, SupplierId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_supplier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub legal_name: String,
    pub cif: String,
    pub contact_email: String,
    pub phone: String,
    pub category: String,
    pub payment_terms_days: i32,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Supplier {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Supplier {
            base: BaseAggregate::with_metadata(
                SupplierId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            legal_name: m.legal_name,
            cif: m.cif,
            contact_email: m.contact_email,
            phone: m.phone,
            category: m.category,
            payment_terms_days: m.payment_terms_days,
            status: m.status,
        }
    }
}

fn active_from(aggregate: &Supplier) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        legal_name: Set(aggregate.legal_name.clone()),
        cif: Set(aggregate.cif.clone()),
        contact_email: Set(aggregate.contact_email.clone()),
        phone: Set(aggregate.phone.clone()),
        category: Set(aggregate.category.clone()),
        payment_terms_days: Set(aggregate.payment_terms_days),
        status: Set(aggregate.status.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Supplier>> {
    let mut items: Vec<Supplier> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Supplier>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Supplier) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

/// Insert a whole import batch. Callers validate up front; a failure here
/// aborts the remainder.
pub async fn insert_many(aggregates: &[Supplier]) -> anyhow::Result<usize> {
    for aggregate in aggregates {
        active_from(aggregate).insert(conn()).await?;
    }
    Ok(aggregates.len())
}

pub async fn update(aggregate: &Supplier) -> anyhow::Result<()> {
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
