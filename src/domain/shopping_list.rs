use serde::{Deserialize, Serialize};

/// One aggregated shopping-list position: a (name, unit) group with the
/// summed amount across every recipe in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    /// Sum of the per-recipe amounts.
    pub total: i64,
}
