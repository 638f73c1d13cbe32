//! Bulk pricing recalculation.
//!
//! Given a product's pricing snapshot and the one field a bulk edit changed,
//! recompute every dependent field so the record stays mutually consistent:
//! `price = base + gst`, `gst = base * tax/100`, `price = mrp * (1 - margin/100)`.
//! The UI previews the result before submitting it to the catalog backend,
//! which runs its own authoritative recompute.

use basil_shared::{round2, Percentage};
use serde::{Deserialize, Serialize};

use crate::product::ProductPricing;

/// The input field a bulk edit changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingField {
    Mrp,
    MarginPercentage,
    PurchaseMarginPercentage,
    TaxPercentage,
}

/// Recompute all pricing fields that depend on `field` taking `value`.
///
/// Total over its numeric domain: it never fails. Out-of-range or missing
/// inputs produce fewer populated output fields instead of an error, and any
/// field computing to zero or less is omitted. Callers must treat an absent
/// field as "leave unchanged on the server", never as "clear".
pub fn recalculate(current: &ProductPricing, field: PricingField, value: f64) -> ProductPricing {
    let mut next = current.clone();
    match field {
        PricingField::Mrp => next.mrp = Some(value),
        PricingField::MarginPercentage => next.margin_percentage = Some(value),
        PricingField::PurchaseMarginPercentage => next.purchase_margin_percentage = Some(value),
        PricingField::TaxPercentage => next.tax_percentage = Some(value),
    }

    let out = match field {
        PricingField::TaxPercentage => recalculate_from_tax(&next),
        _ => recalculate_from_mrp(&next),
    };

    scrub(out)
}

/// Tax rate changed: the tax-exclusive bases are authoritative and stay
/// fixed; GST and the inclusive prices are recomputed from the new rate,
/// then the margins are re-derived against MRP.
fn recalculate_from_tax(p: &ProductPricing) -> ProductPricing {
    let mut out = p.clone();
    let rate = p.tax_percentage.unwrap_or(0.0);

    if let Some(base) = positive(p.cost_price_base) {
        let gst = round2(base * rate / 100.0);
        out.cost_gst = Some(gst);
        out.cost_price = Some(round2(base + gst));
    }
    if let Some(base) = positive(p.selling_price_base) {
        let gst = round2(base * rate / 100.0);
        out.selling_gst = Some(gst);
        out.selling_price = Some(round2(base + gst));
    }

    // A degenerate MRP/price ratio would derive a 0% or >=100% margin;
    // in that case the existing margin stands.
    if let Some(margin) = derived_margin(p.mrp, out.selling_price) {
        out.margin_percentage = Some(margin);
    }
    if let Some(margin) = derived_margin(p.mrp, out.cost_price) {
        out.purchase_margin_percentage = Some(margin);
    }

    out
}

/// MRP or a margin changed: derive the inclusive prices forward from MRP,
/// split them into base + GST via the tax rate, and back-fill margins that
/// are still unset.
fn recalculate_from_mrp(p: &ProductPricing) -> ProductPricing {
    let mut out = p.clone();
    let mrp = positive(p.mrp);
    let rate = p.tax_percentage.unwrap_or(0.0);

    if let Some(price) = derive_inclusive(mrp, p.margin_percentage, p.selling_price) {
        let (base, gst) = split_inclusive(price, rate);
        out.selling_price = Some(price);
        out.selling_price_base = Some(base);
        out.selling_gst = gst;

        if !is_established(p.margin_percentage) {
            if let Some(margin) = derived_margin(mrp, Some(price)) {
                out.margin_percentage = Some(margin);
            }
        }
    }

    if let Some(price) = derive_inclusive(mrp, p.purchase_margin_percentage, p.cost_price) {
        let (base, gst) = split_inclusive(price, rate);
        out.cost_price = Some(price);
        out.cost_price_base = Some(base);
        out.cost_gst = gst;

        if !is_established(p.purchase_margin_percentage) {
            if let Some(margin) = derived_margin(mrp, Some(price)) {
                out.purchase_margin_percentage = Some(margin);
            }
        }
    }

    out
}

/// Forward derivation of an inclusive price from MRP and margin, with the
/// fallback chain: valid MRP+margin wins, else the existing price, else MRP
/// itself (a 0% margin edit means "sell at MRP").
fn derive_inclusive(mrp: Option<f64>, margin: Option<f64>, existing: Option<f64>) -> Option<f64> {
    if let (Some(mrp), Some(margin)) = (mrp, margin.and_then(Percentage::try_new)) {
        return Some(round2(mrp * (1.0 - margin.fraction())));
    }
    positive(existing).or(mrp)
}

/// Split a tax-inclusive price into its exclusive base and GST component.
/// The split is additive: `base + gst == price` exactly after rounding.
fn split_inclusive(inclusive: f64, rate: f64) -> (f64, Option<f64>) {
    if rate > 0.0 {
        let base = round2(inclusive / (1.0 + rate / 100.0));
        (base, Some(round2(inclusive - base)))
    } else {
        (inclusive, None)
    }
}

/// Back-derive a margin from MRP and an inclusive price, accepted only when
/// strictly inside (0, 100).
fn derived_margin(mrp: Option<f64>, price: Option<f64>) -> Option<f64> {
    let mrp = positive(mrp)?;
    let price = positive(price)?;
    Percentage::try_new((1.0 - price / mrp) * 100.0).map(|m| round2(m.value()))
}

/// A margin counts as established once it holds any nonzero value, even an
/// out-of-range one; only a missing or zero margin gets back-filled.
fn is_established(margin: Option<f64>) -> bool {
    margin.is_some_and(|m| m != 0.0)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Margins at exactly 100% are as degenerate as 0% (a free product) and are
/// never emitted; other out-of-range values a user typed pass through.
fn emitted_margin(value: Option<f64>) -> Option<f64> {
    positive(value).filter(|m| *m != 100.0)
}

/// Drop every field that computed to zero or less: the server keeps its
/// current value for omitted fields.
fn scrub(mut p: ProductPricing) -> ProductPricing {
    p.mrp = positive(p.mrp);
    p.tax_percentage = positive(p.tax_percentage);
    p.margin_percentage = emitted_margin(p.margin_percentage);
    p.purchase_margin_percentage = emitted_margin(p.purchase_margin_percentage);
    p.cost_price = positive(p.cost_price);
    p.cost_price_base = positive(p.cost_price_base);
    p.cost_gst = positive(p.cost_gst);
    p.selling_price = positive(p.selling_price);
    p.selling_price_base = positive(p.selling_price_base);
    p.selling_gst = positive(p.selling_gst);
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ProductPricing {
        ProductPricing {
            mrp: Some(1000.0),
            tax_percentage: Some(18.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_purchase_margin_change_derives_cost_triad() {
        let out = recalculate(&snapshot(), PricingField::PurchaseMarginPercentage, 20.0);
        assert_eq!(out.cost_price, Some(800.0));
        assert_eq!(out.cost_price_base, Some(677.97));
        assert_eq!(out.cost_gst, Some(122.03));
        assert_eq!(out.purchase_margin_percentage, Some(20.0));
    }

    #[test]
    fn test_margin_change_derives_selling_triad() {
        let out = recalculate(&snapshot(), PricingField::MarginPercentage, 25.0);
        assert_eq!(out.selling_price, Some(750.0));
        assert_eq!(out.selling_price_base, Some(635.59));
        assert_eq!(out.selling_gst, Some(114.41));
        // additive invariant
        assert_eq!(
            round2(out.selling_price_base.unwrap() + out.selling_gst.unwrap()),
            out.selling_price.unwrap()
        );
    }

    #[test]
    fn test_tax_change_holds_bases_fixed() {
        let current = ProductPricing {
            selling_price_base: Some(100.0),
            selling_price: Some(118.0),
            selling_gst: Some(18.0),
            tax_percentage: Some(18.0),
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::TaxPercentage, 12.0);
        assert_eq!(out.selling_price_base, Some(100.0));
        assert_eq!(out.selling_gst, Some(12.0));
        assert_eq!(out.selling_price, Some(112.0));
        assert_eq!(out.tax_percentage, Some(12.0));
    }

    #[test]
    fn test_tax_change_rederives_margin_only_when_sane() {
        let current = ProductPricing {
            mrp: Some(200.0),
            selling_price_base: Some(100.0),
            selling_price: Some(118.0),
            margin_percentage: Some(41.0),
            tax_percentage: Some(18.0),
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::TaxPercentage, 12.0);
        // 1 - 112/200 = 44% -> inside (0,100), so the margin follows the price
        assert_eq!(out.margin_percentage, Some(44.0));

        // MRP below the recomputed price would derive a negative margin;
        // the existing one must stand
        let degenerate = ProductPricing {
            mrp: Some(100.0),
            selling_price_base: Some(100.0),
            selling_price: Some(118.0),
            margin_percentage: Some(41.0),
            tax_percentage: Some(18.0),
            ..Default::default()
        };
        let out = recalculate(&degenerate, PricingField::TaxPercentage, 12.0);
        assert_eq!(out.margin_percentage, Some(41.0));
    }

    #[test]
    fn test_zero_margin_falls_back_to_mrp() {
        let current = ProductPricing {
            mrp: Some(100.0),
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::MarginPercentage, 0.0);
        assert_eq!(out.selling_price, Some(100.0));
        // a 0% margin is "no margin", not a computed discount
        assert_eq!(out.margin_percentage, None);
    }

    #[test]
    fn test_hundred_percent_margin_rejected() {
        let current = ProductPricing {
            mrp: Some(100.0),
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::MarginPercentage, 100.0);
        // the price falls back to MRP and the degenerate margin is omitted
        assert_eq!(out.selling_price, Some(100.0));
        assert_eq!(out.margin_percentage, None);

        let out = recalculate(&current, PricingField::PurchaseMarginPercentage, 100.0);
        assert_eq!(out.cost_price, Some(100.0));
        assert_eq!(out.purchase_margin_percentage, None);
    }

    #[test]
    fn test_existing_price_wins_over_mrp_fallback() {
        let current = ProductPricing {
            mrp: Some(100.0),
            selling_price: Some(80.0),
            margin_percentage: Some(150.0), // out of range, keeps its slot
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::Mrp, 100.0);
        assert_eq!(out.selling_price, Some(80.0));
        // nonzero (even invalid) margin is never back-filled
        assert_eq!(out.margin_percentage, Some(150.0));
    }

    #[test]
    fn test_mrp_change_backfills_unset_margin() {
        let current = ProductPricing {
            selling_price: Some(80.0),
            tax_percentage: Some(5.0),
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::Mrp, 100.0);
        assert_eq!(out.selling_price, Some(80.0));
        assert_eq!(out.margin_percentage, Some(20.0));
        assert_eq!(out.selling_price_base, Some(76.19));
        assert_eq!(out.selling_gst, Some(3.81));
    }

    #[test]
    fn test_zero_tax_rate_leaves_base_equal_and_no_gst() {
        let current = ProductPricing {
            mrp: Some(100.0),
            margin_percentage: Some(10.0),
            ..Default::default()
        };
        let out = recalculate(&current, PricingField::MarginPercentage, 10.0);
        assert_eq!(out.selling_price, Some(90.0));
        assert_eq!(out.selling_price_base, Some(90.0));
        assert_eq!(out.selling_gst, None);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_output() {
        let out = recalculate(&ProductPricing::default(), PricingField::MarginPercentage, 50.0);
        assert_eq!(out.selling_price, None);
        assert_eq!(out.cost_price, None);
        assert_eq!(out.mrp, None);
        // the edited margin itself survives
        assert_eq!(out.margin_percentage, Some(50.0));
    }

    #[test]
    fn test_negative_mrp_is_scrubbed() {
        let out = recalculate(&ProductPricing::default(), PricingField::Mrp, -10.0);
        assert_eq!(out.mrp, None);
        assert_eq!(out.selling_price, None);
    }

    #[test]
    fn test_idempotent() {
        let a = recalculate(&snapshot(), PricingField::MarginPercentage, 25.0);
        let b = recalculate(&snapshot(), PricingField::MarginPercentage, 25.0);
        assert_eq!(a, b);
    }
}
