use serde::{Deserialize, Serialize};

/// Reference ingredient with its unit of measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Unique identifier of the ingredient.
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Payload required to insert a new reference ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl NewIngredient {
    /// Construct an ingredient payload with trimmed fields.
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            measurement_unit: measurement_unit.into().trim().to_string(),
        }
    }
}

/// Query definition used to list reference ingredients.
#[derive(Debug, Clone, Default)]
pub struct IngredientListQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

impl IngredientListQuery {
    /// Construct a query over the whole ingredient catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only ingredients whose name starts with `prefix`.
    pub fn name(mut self, prefix: impl Into<String>) -> Self {
        self.name = Some(prefix.into());
        self
    }
}
