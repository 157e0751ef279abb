use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::target::Target;

/// An ingredient addition, the unit of cost attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionRecord {
    pub uuid: Uuid,
    /// `None` when the stored row violates the exactly-one-reference invariant
    pub target: Option<Target>,
    pub addition_type: String,
    pub stage: Option<String>,
    pub inventory_lot_uuid: Option<Uuid>,
    pub amount: i64,
    pub amount_unit: String,
    pub added_at: DateTime<Utc>,
}

/// Ingredient lot as served by the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLot {
    pub uuid: Uuid,
    pub ingredient_uuid: Uuid,
    pub ingredient_name: String,
    pub ingredient_category: String,
    #[serde(default)]
    pub brewery_lot_code: Option<String>,
    #[serde(default)]
    pub purchase_order_line_uuid: Option<Uuid>,
    pub received_unit: String,
}

/// Purchase order line pricing as served by the procurement service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLineCost {
    pub uuid: Uuid,
    /// Minor currency units per `quantity_unit`
    pub unit_cost_cents: i64,
    pub quantity: i64,
    pub quantity_unit: String,
    pub currency: String,
}
