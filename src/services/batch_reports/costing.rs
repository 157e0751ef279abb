//! Ingredient cost attribution.
//!
//! Each addition is classified once per report:
//!
//! * no inventory lot reference: listed as uncosted (`no_inventory_lot`)
//! * lot without a purchase order line: line item, cost unavailable
//! * purchase order line in a different unit: line item, cost unavailable
//! * matching unit: line item costed at `amount * unit_cost_cents`

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AdditionRecord, IngredientLot, PurchaseOrderLineCost};

use super::units::round_to;

/// Reported instead of a currency code when costed lines disagree.
pub const MIXED_CURRENCY: &str = "MIXED";
pub const REASON_NO_INVENTORY_LOT: &str = "no_inventory_lot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    PurchaseOrder,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CostLineItem {
    pub addition_uuid: Uuid,
    pub addition_type: String,
    pub amount: i64,
    pub amount_unit: String,
    pub inventory_lot_uuid: Uuid,
    pub ingredient_uuid: Uuid,
    pub ingredient_name: String,
    pub ingredient_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brewery_lot_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order_line_uuid: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_cents: Option<i64>,
    pub cost_source: CostSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UncostedAddition {
    pub addition_uuid: Uuid,
    pub addition_type: String,
    pub amount: i64,
    pub amount_unit: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchCostReport {
    pub batch_uuid: Uuid,
    pub line_items: Vec<CostLineItem>,
    pub uncosted_additions: Vec<UncostedAddition>,
    pub total_cost_cents: i64,
    pub costed_line_count: usize,
    pub uncosted_line_count: usize,
    pub cost_complete: bool,
    /// ISO currency code, or `MIXED` when costed lines use more than one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_volume_bbl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_bbl_cents: Option<i64>,
    pub generated_at: DateTime<Utc>,
}

impl BatchCostReport {
    /// Report for a batch without ingredient additions.
    pub fn without_additions(
        batch_uuid: Uuid,
        starting_volume_bbl: Option<f64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            batch_uuid,
            line_items: Vec::new(),
            uncosted_additions: Vec::new(),
            total_cost_cents: 0,
            costed_line_count: 0,
            uncosted_line_count: 0,
            cost_complete: true,
            currency: None,
            starting_volume_bbl,
            cost_per_bbl_cents: None,
            generated_at: now,
        }
    }
}

/// Distinct purchase order line ids referenced by `lots`, in first-seen order.
pub fn purchase_order_line_ids(lots: &[IngredientLot]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    lots.iter()
        .filter_map(|lot| lot.purchase_order_line_uuid)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn line_item(
    addition: &AdditionRecord,
    lot: &IngredientLot,
    po_line: Option<&PurchaseOrderLineCost>,
) -> CostLineItem {
    let cost_cents = po_line
        .filter(|line| line.quantity_unit == addition.amount_unit)
        .and_then(|line| {
            let cost = addition.amount.checked_mul(line.unit_cost_cents);
            if cost.is_none() {
                tracing::warn!(
                    addition = %addition.uuid,
                    purchase_order_line = %line.uuid,
                    "addition cost overflows; leaving it unavailable"
                );
            }
            cost
        });

    CostLineItem {
        addition_uuid: addition.uuid,
        addition_type: addition.addition_type.clone(),
        amount: addition.amount,
        amount_unit: addition.amount_unit.clone(),
        inventory_lot_uuid: lot.uuid,
        ingredient_uuid: lot.ingredient_uuid,
        ingredient_name: lot.ingredient_name.clone(),
        ingredient_category: lot.ingredient_category.clone(),
        brewery_lot_code: lot.brewery_lot_code.clone(),
        purchase_order_line_uuid: po_line.map(|line| line.uuid),
        unit_cost_cents: po_line.map(|line| line.unit_cost_cents),
        currency: po_line.map(|line| line.currency.clone()),
        cost_cents,
        cost_source: if cost_cents.is_some() {
            CostSource::PurchaseOrder
        } else {
            CostSource::Unavailable
        },
    }
}

fn uncosted(addition: &AdditionRecord) -> UncostedAddition {
    UncostedAddition {
        addition_uuid: addition.uuid,
        addition_type: addition.addition_type.clone(),
        amount: addition.amount,
        amount_unit: addition.amount_unit.clone(),
        reason: REASON_NO_INVENTORY_LOT.to_string(),
    }
}

/// Sums line costs in order. A line whose cost would push the total past
/// `i64::MAX` is downgraded to unavailable and left out of the total.
fn accumulate_total(line_items: &mut [CostLineItem]) -> i64 {
    let mut total: i64 = 0;
    for item in line_items.iter_mut() {
        let Some(cost) = item.cost_cents else {
            continue;
        };
        match total.checked_add(cost) {
            Some(sum) => total = sum,
            None => {
                tracing::warn!(
                    addition = %item.addition_uuid,
                    "batch cost total overflows; leaving addition cost unavailable"
                );
                item.cost_cents = None;
                item.cost_source = CostSource::Unavailable;
            }
        }
    }
    total
}

/// Classifies every addition and aggregates totals.
///
/// An addition whose lot reference is not among `lots` is treated like one
/// without a reference. Additions with an invalid target go through the same
/// classification as any other.
pub fn attribute_costs(
    batch_uuid: Uuid,
    additions: &[AdditionRecord],
    lots: &[IngredientLot],
    po_lines: &[PurchaseOrderLineCost],
    starting_volume_bbl: Option<f64>,
    now: DateTime<Utc>,
) -> BatchCostReport {
    if additions.is_empty() {
        return BatchCostReport::without_additions(batch_uuid, starting_volume_bbl, now);
    }

    let lots_by_id: HashMap<Uuid, &IngredientLot> = lots.iter().map(|l| (l.uuid, l)).collect();
    let po_lines_by_id: HashMap<Uuid, &PurchaseOrderLineCost> =
        po_lines.iter().map(|p| (p.uuid, p)).collect();

    let mut line_items = Vec::new();
    let mut uncosted_additions = Vec::new();

    for addition in additions {
        if addition.target.is_none() {
            tracing::warn!(
                addition = %addition.uuid,
                "addition does not reference exactly one of batch, occupancy, volume"
            );
        }

        let lot = addition
            .inventory_lot_uuid
            .and_then(|id| lots_by_id.get(&id).copied());

        match lot {
            Some(lot) => {
                let po_line = lot
                    .purchase_order_line_uuid
                    .and_then(|id| po_lines_by_id.get(&id).copied());
                line_items.push(line_item(addition, lot, po_line));
            }
            None => {
                if let Some(lot_id) = addition.inventory_lot_uuid {
                    tracing::warn!(
                        addition = %addition.uuid,
                        inventory_lot = %lot_id,
                        "inventory lot not returned for batch"
                    );
                }
                uncosted_additions.push(uncosted(addition));
            }
        }
    }

    let total_cost_cents = accumulate_total(&mut line_items);
    let costed_line_count = line_items.iter().filter(|l| l.cost_cents.is_some()).count();
    let uncosted_line_count = line_items.len() - costed_line_count + uncosted_additions.len();

    let currencies: BTreeSet<&str> = line_items
        .iter()
        .filter(|l| l.cost_cents.is_some())
        .filter_map(|l| l.currency.as_deref())
        .collect();
    let currency = match currencies.len() {
        0 => None,
        1 => currencies.iter().next().map(|c| c.to_string()),
        _ => Some(MIXED_CURRENCY.to_string()),
    };

    let cost_per_bbl_cents = match starting_volume_bbl {
        Some(start) if start > 0.0 && currency.as_deref() != Some(MIXED_CURRENCY) => {
            Some(round_to(total_cost_cents as f64 / start, 0) as i64)
        }
        _ => None,
    };

    BatchCostReport {
        batch_uuid,
        line_items,
        uncosted_additions,
        total_cost_cents,
        costed_line_count,
        uncosted_line_count,
        cost_complete: uncosted_line_count == 0,
        currency,
        starting_volume_bbl,
        cost_per_bbl_cents,
        generated_at: now,
    }
}
