use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pricing fields of a catalog product, as exchanged with the backend.
///
/// Every field is optional: `None` means "unset on the server", which is
/// distinct from zero. Serialization skips unset fields so a partial record
/// submitted in an update leaves the omitted fields untouched.
///
/// The tax-inclusive / tax-exclusive / GST triads satisfy
/// `price = base + gst` with `gst = base * tax/100`, rounded to 2 decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    /// Maximum retail price, the tax-inclusive ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,

    /// Applicable GST/VAT rate, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percentage: Option<f64>,

    /// Markdown from MRP to the selling price, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_percentage: Option<f64>,

    /// Markdown from MRP to the cost price, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_margin_percentage: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price_base: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_gst: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price_base: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_gst: Option<f64>,
}

/// A catalog entry for a store's product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Harmonized System of Nomenclature code, for GST invoices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    /// Sale unit, e.g. "pcs", "kg".
    pub unit: String,
    pub is_active: bool,
    #[serde(flatten)]
    pub pricing: ProductPricing,
    pub metadata: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            barcode: None,
            hsn_code: None,
            unit: unit.into(),
            is_active: true,
            pricing: ProductPricing::default(),
            metadata: serde_json::json!({}),
            updated_at: Utc::now(),
        }
    }
}
