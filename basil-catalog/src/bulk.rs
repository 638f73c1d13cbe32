use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::product::{Product, ProductPricing};
use crate::recalculate::{recalculate, PricingField};

/// A single-field price edit applied across a product selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdate {
    pub field: PricingField,
    pub value: f64,
}

impl BulkUpdate {
    pub fn new(field: PricingField, value: f64) -> Self {
        Self { field, value }
    }

    /// Recalculate pricing for every active product in the batch.
    ///
    /// Inactive products are skipped. The returned partial records are what
    /// the caller submits back to the catalog service; omitted fields stay
    /// as-is on the server.
    pub fn apply(&self, products: &[Product]) -> Vec<(Uuid, ProductPricing)> {
        let updates: Vec<(Uuid, ProductPricing)> = products
            .iter()
            .filter(|p| p.is_active)
            .map(|p| (p.id, recalculate(&p.pricing, self.field, self.value)))
            .collect();

        tracing::debug!(
            "Bulk pricing update ({:?} = {}): {} of {} products recalculated",
            self.field,
            self.value,
            updates.len(),
            products.len()
        );

        updates
    }
}
