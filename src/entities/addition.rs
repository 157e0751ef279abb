use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An ingredient added to a batch, one of its occupancies, or one of its volumes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "additions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub batch_id: Option<i64>,
    pub occupancy_id: Option<i64>,
    pub volume_id: Option<i64>,
    pub addition_type: String,
    pub stage: Option<String>,
    pub inventory_lot_uuid: Option<Uuid>,
    pub amount: i64,
    pub amount_unit: String,
    pub added_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
