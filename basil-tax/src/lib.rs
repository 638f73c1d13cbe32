pub mod breakdown;
pub mod registration;

pub use breakdown::{tax_from_gross, TaxBreakdown, TaxComponent, TaxComponentKind};
pub use registration::{validate_gstin, validate_vat_id, Gstin, VatId};

use basil_shared::Country;

#[derive(Debug, thiserror::Error)]
pub enum TaxError {
    #[error("Invalid tax rate: {0}")]
    InvalidRate(f64),

    #[error("Invalid taxable amount: {0}")]
    InvalidAmount(f64),

    #[error("Malformed GSTIN: {0}")]
    MalformedGstin(String),

    #[error("GSTIN check digit mismatch: expected {expected}, got {actual}")]
    GstinCheckDigit { expected: char, actual: char },

    #[error("Unknown GST state code: {0}")]
    UnknownStateCode(String),

    #[error("Malformed VAT ID for {country:?}: {value}")]
    MalformedVatId { country: Country, value: String },

    #[error("Registration scheme does not apply to {0:?}")]
    WrongScheme(Country),
}

pub type TaxResult<T> = Result<T, TaxError>;
