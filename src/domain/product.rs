use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the inventory.
///
/// Serialized with the resource's wire keys: `id`, `nombre`, `precio`, `stock`.
/// `precio` is always rendered as a string with two fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Decimal,
    pub stock: i32,
}

/// Payload for creating a new product. Produced by [`crate::product_actor::validate_create`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// Payload for updating an existing product. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
