pub mod bulk;
pub mod product;
pub mod recalculate;
pub mod stock;

pub use bulk::BulkUpdate;
pub use product::{Product, ProductPricing};
pub use recalculate::{recalculate, PricingField};
pub use stock::{StockItem, StockManager};
