use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tallybook_core::{DomainError, DomainResult, Entity, ItemId, Money};

use crate::item::{InventoryItem, ItemDetails, StockStatus};

/// The in-memory inventory collection.
///
/// Owns its items outright; the table, modals and stat cards of the UI all
/// read from (and write through) one of these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryBook {
    items: Vec<InventoryItem>,
}

/// Filter over inventory items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Case-insensitive substring over name, SKU and supplier.
    pub text: Option<String>,
    pub category: Option<String>,
    pub status: Option<StockStatus>,
}

impl ItemFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn status(status: StockStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = item.name().to_lowercase().contains(&needle)
                || item.sku().to_lowercase().contains(&needle)
                || item.supplier().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if item.category() != category {
                return false;
            }
        }
        match self.status {
            Some(status) => item.status() == status,
            None => true,
        }
    }
}

/// Headline numbers for the inventory dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_items: usize,
    /// Σ quantity × unit price across all items.
    pub total_value: Money,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a new item, stamped with `on`.
    pub fn add(&mut self, details: ItemDetails, on: NaiveDate) -> DomainResult<&InventoryItem> {
        details.validate()?;

        let item = InventoryItem::new(ItemId::new(), details, on);
        tracing::debug!(sku = item.sku(), quantity = item.quantity(), "inventory item added");
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace an existing item's fields, stamping the update date.
    pub fn update(
        &mut self,
        id: ItemId,
        details: ItemDetails,
        on: NaiveDate,
    ) -> DomainResult<&InventoryItem> {
        details.validate()?;

        let item = self
            .items
            .iter_mut()
            .find(|i| *i.id() == id)
            .ok_or_else(DomainError::not_found)?;
        item.replace_details(details, on);
        Ok(item)
    }

    pub fn remove(&mut self, id: ItemId) -> DomainResult<InventoryItem> {
        let index = self
            .items
            .iter()
            .position(|i| *i.id() == id)
            .ok_or_else(DomainError::not_found)?;
        let removed = self.items.remove(index);
        tracing::debug!(sku = removed.sku(), "inventory item removed");
        Ok(removed)
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|i| *i.id() == id)
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Items matching `filter`, in insertion order.
    pub fn find(&self, filter: &ItemFilter) -> Vec<&InventoryItem> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }

    /// Distinct categories, sorted, for the filter dropdown.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.items.iter().map(|i| i.category().to_string()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn stats(&self) -> DomainResult<InventoryStats> {
        let mut total_value = Money::ZERO;
        let mut low_stock = 0;
        let mut out_of_stock = 0;

        for item in &self.items {
            total_value = total_value
                .checked_add(item.value()?)
                .ok_or_else(|| DomainError::invariant("inventory value overflow"))?;
            match item.status() {
                StockStatus::LowStock => low_stock += 1,
                StockStatus::OutOfStock => out_of_stock += 1,
                StockStatus::InStock => {}
            }
        }

        Ok(InventoryStats {
            total_items: self.items.len(),
            total_value,
            low_stock,
            out_of_stock,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
