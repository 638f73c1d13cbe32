use basil_shared::{round2, Country};
use serde::{Deserialize, Serialize};

use crate::TaxError;

/// Named tax lines as they appear on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxComponentKind {
    /// Central GST: half of the rate on an intrastate Indian sale.
    Cgst,
    /// State GST: the other half.
    Sgst,
    /// Integrated GST: full rate on an interstate Indian sale.
    Igst,
    /// EU value-added tax (NL/DE).
    Vat,
}

/// One tax line within a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxComponent {
    pub kind: TaxComponentKind,
    pub rate: f64,
    pub amount: f64,
}

/// Country-aware tax derivation for a single sale line.
///
/// India splits GST into CGST+SGST within a state and charges IGST across
/// states; the EU markets carry a single VAT line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub taxable_value: f64,
    pub total_tax: f64,
    pub components: Vec<TaxComponent>,
}

impl TaxBreakdown {
    /// Derive the tax lines for a tax-exclusive amount at the given rate.
    ///
    /// `interstate` only matters for India; the EU markets ignore it.
    pub fn for_sale(
        country: Country,
        taxable_value: f64,
        rate: f64,
        interstate: bool,
    ) -> Result<Self, TaxError> {
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err(TaxError::InvalidRate(rate));
        }
        if !taxable_value.is_finite() || taxable_value < 0.0 {
            return Err(TaxError::InvalidAmount(taxable_value));
        }

        let components = match country {
            Country::India if interstate => {
                vec![component(TaxComponentKind::Igst, rate, taxable_value)]
            }
            Country::India => {
                let half = rate / 2.0;
                vec![
                    component(TaxComponentKind::Cgst, half, taxable_value),
                    component(TaxComponentKind::Sgst, half, taxable_value),
                ]
            }
            Country::Netherlands | Country::Germany => {
                vec![component(TaxComponentKind::Vat, rate, taxable_value)]
            }
        };

        let total_tax = round2(components.iter().map(|c| c.amount).sum());

        Ok(Self {
            taxable_value,
            total_tax,
            components,
        })
    }
}

fn component(kind: TaxComponentKind, rate: f64, taxable_value: f64) -> TaxComponent {
    TaxComponent {
        kind,
        rate,
        amount: round2(taxable_value * rate / 100.0),
    }
}

/// Tax component embedded in a tax-inclusive amount.
///
/// `gross * rate / (100 + rate)`, 0 when the rate is not positive.
pub fn tax_from_gross(gross: f64, rate: f64) -> f64 {
    if rate <= 0.0 {
        0.0
    } else {
        round2(gross * rate / (100.0 + rate))
    }
}
