use chrono::Utc;
use contracts::domain::a003_machinery::{Machinery, MachineryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_machinery")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub supplier_id: Option<String>,
    pub category: String,
    pub plate_or_serial: String,
    pub monthly_rental_cost: f64,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Machinery {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Machinery {
            base: BaseAggregate::with_metadata(
                MachineryId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            supplier_id: m.supplier_id,
            category: m.category,
            plate_or_serial: m.plate_or_serial,
            monthly_rental_cost: m.monthly_rental_cost,
            status: m.status,
        }
    }
}

fn active_from(aggregate: &Machinery) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        supplier_id: Set(aggregate.supplier_id.clone()),
        category: Set(aggregate.category.clone()),
        plate_or_serial: Set(aggregate.plate_or_serial.clone()),
        monthly_rental_cost: Set(aggregate.monthly_rental_cost),
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

pub async fn list_all() -> anyhow::Result<Vec<Machinery>> {
    let mut items: Vec<Machinery> = Entity::find()
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Machinery>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Machinery) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn insert_many(aggregates: &[Machinery]) -> anyhow::Result<usize> {
    for aggregate in aggregates {
        active_from(aggregate).insert(conn()).await?;
    }
    Ok(aggregates.len())
}

pub async fn update(aggregate: &Machinery) -> anyhow::Result<()> {
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
