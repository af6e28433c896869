//! Coffee domain model.
//!
//! # Responsibility
//! - Define the in-memory record mapped to one `coffees` row.
//! - Provide the natural-key view used by keyed statements.
//!
//! # Invariants
//! - `(name, supplier_id)` identifies the row targeted by update/delete.
//! - `price` is fixed-point; it is never routed through binary floats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supplier identifier as stored in `coffees.sup_id`.
pub type SupplierId = i64;

/// One coffee variety offered by one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coffee {
    /// Variety name, stored in `cof_name`.
    pub name: String,
    /// Serialized as `supplierId` to match external schema naming.
    #[serde(rename = "supplierId")]
    pub supplier_id: SupplierId,
    /// Serialized as a decimal string to keep exact cents.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Units sold.
    pub sales: i64,
    /// Cumulative total.
    pub total: i64,
}

impl Coffee {
    pub fn new(
        name: impl Into<String>,
        supplier_id: SupplierId,
        price: Decimal,
        sales: i64,
        total: i64,
    ) -> Self {
        Self {
            name: name.into(),
            supplier_id,
            price,
            sales,
            total,
        }
    }

    /// Borrows the natural key of this record.
    pub fn key(&self) -> CoffeeKey<'_> {
        CoffeeKey {
            name: self.name.as_str(),
            supplier_id: self.supplier_id,
        }
    }
}

/// Natural key `(cof_name, sup_id)` bound by keyed lookups and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoffeeKey<'a> {
    pub name: &'a str,
    pub supplier_id: SupplierId,
}

impl<'a> CoffeeKey<'a> {
    pub fn new(name: &'a str, supplier_id: SupplierId) -> Self {
        Self { name, supplier_id }
    }
}

#[cfg(test)]
mod tests {
    use super::{Coffee, CoffeeKey};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn key_borrows_name_and_supplier() {
        let coffee = Coffee::new("Espresso", 150, Decimal::from_str("9.99").unwrap(), 0, 0);
        assert_eq!(coffee.key(), CoffeeKey::new("Espresso", 150));
    }
}
