use chrono::Utc;
use contracts::domain::a004_fleet_vehicle::{FleetVehicle, FleetVehicleId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_fleet_vehicle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub itv_due: Option<chrono::NaiveDate>,
    pub assigned_worker_id: Option<String>,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FleetVehicle {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        FleetVehicle {
            base: BaseAggregate::with_metadata(
                FleetVehicleId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            plate: m.plate,
            brand: m.brand,
            model: m.model,
            itv_due: m.itv_due,
            assigned_worker_id: m.assigned_worker_id,
            status: m.status,
        }
    }
}

fn active_from(aggregate: &FleetVehicle) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        plate: Set(aggregate.plate.clone()),
        brand: Set(aggregate.brand.clone()),
        model: Set(aggregate.model.clone()),
        itv_due: Set(aggregate.itv_due),
        assigned_worker_id: Set(aggregate.assigned_worker_id.clone()),
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

pub async fn list_all() -> anyhow::Result<Vec<FleetVehicle>> {
    let mut items: Vec<FleetVehicle> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.plate.to_lowercase().cmp(&b.plate.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<FleetVehicle>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &FleetVehicle) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn insert_many(aggregates: &[FleetVehicle]) -> anyhow::Result<usize> {
    for aggregate in aggregates {
        active_from(aggregate).insert(conn()).await?;
    }
    Ok(aggregates.len())
}

pub async fn update(aggregate: &FleetVehicle) -> anyhow::Result<()> {
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
