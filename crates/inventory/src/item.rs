use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tallybook_core::{DomainError, DomainResult, Entity, ItemId, Money};

/// Stock level classification, derived from quantity (never stored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// A positive quantity at or below this counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

impl StockStatus {
    pub const fn for_quantity(quantity: i64) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Caller-supplied item fields, shared by add and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub name: String,
    /// Stock-keeping unit, e.g. "WBH-001".
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    /// Unit selling price.
    pub price: Money,
    /// Unit acquisition cost.
    pub cost: Money,
    pub supplier: String,
    pub description: Option<String>,
}

impl ItemDetails {
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.price.is_negative() || self.cost.is_negative() {
            return Err(DomainError::validation("price and cost cannot be negative"));
        }
        Ok(())
    }
}

/// An inventory item with identity and an update timestamp.
///
/// Fields are read through accessors; all mutation goes through the book so
/// validation and the update stamp cannot be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    #[serde(flatten)]
    details: ItemDetails,
    updated_on: NaiveDate,
}

impl InventoryItem {
    pub(crate) fn new(id: ItemId, details: ItemDetails, updated_on: NaiveDate) -> Self {
        Self {
            id,
            details,
            updated_on,
        }
    }

    pub(crate) fn replace_details(&mut self, details: ItemDetails, on: NaiveDate) {
        self.details = details;
        self.updated_on = on;
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn sku(&self) -> &str {
        &self.details.sku
    }

    pub fn category(&self) -> &str {
        &self.details.category
    }

    pub fn quantity(&self) -> i64 {
        self.details.quantity
    }

    pub fn price(&self) -> Money {
        self.details.price
    }

    pub fn cost(&self) -> Money {
        self.details.cost
    }

    pub fn supplier(&self) -> &str {
        &self.details.supplier
    }

    pub fn description(&self) -> Option<&str> {
        self.details.description.as_deref()
    }

    pub fn updated_on(&self) -> NaiveDate {
        self.updated_on
    }

    /// Derived stock status.
    pub fn status(&self) -> StockStatus {
        StockStatus::for_quantity(self.details.quantity)
    }

    /// Stock value at selling price (quantity × price).
    pub fn value(&self) -> DomainResult<Money> {
        self.details
            .price
            .checked_mul(self.details.quantity)
            .ok_or_else(|| DomainError::invariant("stock value overflow"))
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
