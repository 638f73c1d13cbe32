use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stock position of a single product in a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Selling at or below this level flags the item for reordering.
    pub reorder_level: i32,
}

/// In-memory stock tracker for a store's counter flow.
pub struct StockManager {
    stock: HashMap<Uuid, StockItem>,
}

impl StockManager {
    pub fn new() -> Self {
        Self {
            stock: HashMap::new(),
        }
    }

    /// Start tracking a product.
    pub fn initialize(&mut self, product_id: Uuid, quantity: i32, reorder_level: i32) {
        self.stock.insert(
            product_id,
            StockItem {
                product_id,
                quantity,
                reorder_level,
            },
        );
    }

    pub fn get(&self, product_id: &Uuid) -> Option<&StockItem> {
        self.stock.get(product_id)
    }

    /// Record a goods receipt (purchase delivery).
    pub fn receive(&mut self, product_id: &Uuid, quantity: i32) -> Result<(), StockError> {
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        let item = self
            .stock
            .get_mut(product_id)
            .ok_or_else(|| StockError::NotFound(product_id.to_string()))?;

        item.quantity += quantity;
        Ok(())
    }

    /// Record a sale, refusing to go below zero.
    pub fn sell(&mut self, product_id: &Uuid, quantity: i32) -> Result<(), StockError> {
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        let item = self
            .stock
            .get_mut(product_id)
            .ok_or_else(|| StockError::NotFound(product_id.to_string()))?;

        if item.quantity < quantity {
            return Err(StockError::InsufficientStock {
                requested: quantity,
                available: item.quantity,
            });
        }

        let was_above = item.quantity > item.reorder_level;
        item.quantity -= quantity;

        if was_above && item.quantity <= item.reorder_level {
            tracing::warn!(
                "Product {} dropped to reorder level: {} left",
                product_id,
                item.quantity
            );
        }

        Ok(())
    }

    /// Items at or below their reorder level.
    pub fn low_stock(&self) -> Vec<&StockItem> {
        self.stock
            .values()
            .filter(|item| item.quantity <= item.reorder_level)
            .collect()
    }
}

impl Default for StockManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("Stock not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_lifecycle() {
        let mut manager = StockManager::new();
        let product_id = Uuid::new_v4();

        manager.initialize(product_id, 50, 10);
        assert_eq!(manager.get(&product_id).unwrap().quantity, 50);

        manager.receive(&product_id, 20).unwrap();
        assert_eq!(manager.get(&product_id).unwrap().quantity, 70);

        manager.sell(&product_id, 30).unwrap();
        assert_eq!(manager.get(&product_id).unwrap().quantity, 40);
    }

    #[test]
    fn test_sell_refuses_oversell() {
        let mut manager = StockManager::new();
        let product_id = Uuid::new_v4();
        manager.initialize(product_id, 5, 2);

        match manager.sell(&product_id, 6) {
            Err(StockError::InsufficientStock {
                requested,
                available,
            }) => {
                assert_eq!(requested, 6);
                assert_eq!(available, 5);
            }
            other => panic!("expected insufficient stock, got {:?}", other),
        }
        // untouched on failure
        assert_eq!(manager.get(&product_id).unwrap().quantity, 5);
    }

    #[test]
    fn test_low_stock_listing() {
        let mut manager = StockManager::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        manager.initialize(a, 50, 10);
        manager.initialize(b, 8, 10);

        let low = manager.low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].product_id, b);

        manager.sell(&a, 45).unwrap();
        assert_eq!(manager.low_stock().len(), 2);
    }

    #[test]
    fn test_rejects_nonpositive_quantities() {
        let mut manager = StockManager::new();
        let product_id = Uuid::new_v4();
        manager.initialize(product_id, 5, 2);

        assert!(matches!(
            manager.sell(&product_id, 0),
            Err(StockError::InvalidQuantity(0))
        ));
        assert!(matches!(
            manager.receive(&product_id, -1),
            Err(StockError::InvalidQuantity(-1))
        ));
    }

    #[test]
    fn test_unknown_product() {
        let mut manager = StockManager::new();
        assert!(matches!(
            manager.sell(&Uuid::new_v4(), 1),
            Err(StockError::NotFound(_))
        ));
    }
}
