use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single observation. Exactly one of `batch_id`, `occupancy_id` and
/// `volume_id` is expected to be set; the store does not enforce it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub batch_id: Option<i64>,
    pub occupancy_id: Option<i64>,
    pub volume_id: Option<i64>,
    pub kind: String,
    pub value: f64,
    pub unit: Option<String>,
    pub observed_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
