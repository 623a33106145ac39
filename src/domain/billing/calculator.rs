use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::entities::LineItem;
use super::value_objects::{DiscountPercent, GstRate, TaxJurisdiction};

/// Tax configuration for a bill: the total GST rate and whether the sale
/// crosses a state boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxContext {
  pub gst_rate: GstRate,
  pub jurisdiction: TaxJurisdiction,
}

impl TaxContext {
  pub fn new(gst_rate: GstRate, jurisdiction: TaxJurisdiction) -> Self {
    Self {
      gst_rate,
      jurisdiction,
    }
  }

  /// Untaxed context used for challans, which carry no GST.
  pub fn untaxed() -> Self {
    Self {
      gst_rate: GstRate::zero(),
      jurisdiction: TaxJurisdiction::IntraState,
    }
  }
}

/// The full amount pipeline of a bill or challan, frozen at creation time.
///
/// Intra-state sales split the GST rate equally into CGST and SGST;
/// inter-state sales apply the whole rate as IGST. The rounded total is the
/// legal invoice amount (round half-up to the whole rupee) and `round_off`
/// keeps the signed difference for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBreakdown {
  pub subtotal: Decimal,
  pub discount_percent: Decimal,
  pub discount_amount: Decimal,
  pub taxable_amount: Decimal,
  pub gst_rate: Decimal,
  pub cgst: Decimal,
  pub sgst: Decimal,
  pub igst: Decimal,
  pub total: Decimal,
  pub rounded_total: Decimal,
  pub round_off: Decimal,
}

impl AmountBreakdown {
  pub fn compute(items: &[LineItem], discount: DiscountPercent, tax: TaxContext) -> Self {
    let subtotal: Decimal = items.iter().map(|item| item.amount()).sum();

    let discount_amount = subtotal * discount.value() / Decimal::from(100);
    let taxable_amount = subtotal - discount_amount;

    let gst_amount = taxable_amount * tax.gst_rate.value() / Decimal::from(100);
    let (cgst, sgst, igst) = match tax.jurisdiction {
      TaxJurisdiction::InterState => (Decimal::ZERO, Decimal::ZERO, gst_amount),
      TaxJurisdiction::IntraState => {
        let half = gst_amount / Decimal::from(2);
        (half, half, Decimal::ZERO)
      }
    };

    let total = taxable_amount + cgst + sgst + igst;
    let rounded_total = round_half_up(total);
    let round_off = rounded_total - total;

    Self {
      subtotal,
      discount_percent: discount.value(),
      discount_amount,
      taxable_amount,
      gst_rate: tax.gst_rate.value(),
      cgst,
      sgst,
      igst,
      total,
      rounded_total,
      round_off,
    }
  }

  /// Challan variant: the same subtotal/discount/rounding pipeline with no
  /// tax applied.
  pub fn compute_untaxed(items: &[LineItem], discount: DiscountPercent) -> Self {
    Self::compute(items, discount, TaxContext::untaxed())
  }

  /// Unsigned round-off for display; the stored field stays signed.
  pub fn round_off_display(&self) -> Decimal {
    self.round_off.abs()
  }
}

/// Round to the whole currency unit, half away from zero. Applying it twice
/// is a no-op, so already-rounded totals pass through unchanged.
pub fn round_half_up(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::value_objects::{HsnCode, ItemName, Quantity, UnitPrice};
  use rust_decimal_macros::dec;

  fn item(quantity: Decimal, unit_price: Decimal) -> LineItem {
    LineItem::new(
      ItemName::new("Cotton Fabric".to_string()).unwrap(),
      Some(HsnCode::new("5208".to_string()).unwrap()),
      Quantity::new(quantity).unwrap(),
      UnitPrice::new(unit_price).unwrap(),
    )
  }

  fn intra(rate: Decimal) -> TaxContext {
    TaxContext::new(GstRate::new(rate).unwrap(), TaxJurisdiction::IntraState)
  }

  fn inter(rate: Decimal) -> TaxContext {
    TaxContext::new(GstRate::new(rate).unwrap(), TaxJurisdiction::InterState)
  }

  #[test]
  fn test_intra_state_splits_gst_equally() {
    // 2 x 500 @ 18% same-state
    let breakdown = AmountBreakdown::compute(
      &[item(dec!(2), dec!(500))],
      DiscountPercent::zero(),
      intra(dec!(18)),
    );

    assert_eq!(breakdown.subtotal, dec!(1000));
    assert_eq!(breakdown.taxable_amount, dec!(1000));
    assert_eq!(breakdown.cgst, dec!(90));
    assert_eq!(breakdown.sgst, dec!(90));
    assert_eq!(breakdown.igst, dec!(0));
    assert_eq!(breakdown.total, dec!(1180));
    assert_eq!(breakdown.rounded_total, dec!(1180));
    assert_eq!(breakdown.round_off, dec!(0));
  }

  #[test]
  fn test_inter_state_applies_igst() {
    // 3 x 333.33 @ 5% cross-state with 10% discount
    let breakdown = AmountBreakdown::compute(
      &[item(dec!(3), dec!(333.33))],
      DiscountPercent::new(dec!(10)).unwrap(),
      inter(dec!(5)),
    );

    assert_eq!(breakdown.subtotal, dec!(999.99));
    assert_eq!(breakdown.discount_amount, dec!(99.999));
    assert_eq!(breakdown.taxable_amount, dec!(899.991));
    assert_eq!(breakdown.cgst, dec!(0));
    assert_eq!(breakdown.sgst, dec!(0));
    assert_eq!(breakdown.igst, dec!(44.99955));
    assert_eq!(breakdown.rounded_total, dec!(945));
    // signed round-off, magnitude ~0.01
    assert_eq!(breakdown.round_off, breakdown.rounded_total - breakdown.total);
    assert!(breakdown.round_off_display() < dec!(0.011));
    assert!(breakdown.round_off_display() > dec!(0.009));
  }

  #[test]
  fn test_empty_items_yield_zero_amounts() {
    let breakdown =
      AmountBreakdown::compute(&[], DiscountPercent::new(dec!(10)).unwrap(), intra(dec!(18)));
    assert_eq!(breakdown.subtotal, dec!(0));
    assert_eq!(breakdown.taxable_amount, dec!(0));
    assert_eq!(breakdown.total, dec!(0));
    assert_eq!(breakdown.rounded_total, dec!(0));
    assert_eq!(breakdown.round_off, dec!(0));
  }

  #[test]
  fn test_tax_exclusivity() {
    let items = [item(dec!(4), dec!(250.25))];
    for tax in [intra(dec!(12)), inter(dec!(12))] {
      let breakdown =
        AmountBreakdown::compute(&items, DiscountPercent::new(dec!(5)).unwrap(), tax);
      let has_split = breakdown.cgst > dec!(0) && breakdown.sgst > dec!(0);
      let has_igst = breakdown.igst > dec!(0);
      // exactly one branch is non-zero when rate and taxable are positive
      assert!(has_split ^ has_igst);
    }
  }

  #[test]
  fn test_zero_rate_produces_no_tax() {
    let breakdown = AmountBreakdown::compute(
      &[item(dec!(1), dec!(750))],
      DiscountPercent::zero(),
      intra(dec!(0)),
    );
    assert_eq!(breakdown.cgst, dec!(0));
    assert_eq!(breakdown.sgst, dec!(0));
    assert_eq!(breakdown.igst, dec!(0));
    assert_eq!(breakdown.total, dec!(750));
  }

  #[test]
  fn test_round_off_invariant() {
    let breakdown = AmountBreakdown::compute(
      &[item(dec!(7), dec!(142.86)), item(dec!(3), dec!(99.95))],
      DiscountPercent::new(dec!(2.5)).unwrap(),
      intra(dec!(18)),
    );
    let reconstructed = breakdown.taxable_amount + breakdown.cgst + breakdown.sgst + breakdown.igst;
    assert!((breakdown.rounded_total - breakdown.round_off - reconstructed).abs() < dec!(0.000001));
  }

  #[test]
  fn test_full_discount_zeroes_taxable() {
    let breakdown = AmountBreakdown::compute(
      &[item(dec!(2), dec!(500))],
      DiscountPercent::new(dec!(100)).unwrap(),
      intra(dec!(18)),
    );
    assert_eq!(breakdown.discount_amount, dec!(1000));
    assert_eq!(breakdown.taxable_amount, dec!(0));
    assert_eq!(breakdown.total, dec!(0));
  }

  #[test]
  fn test_discount_never_exceeds_subtotal() {
    let breakdown = AmountBreakdown::compute(
      &[item(dec!(2), dec!(123.45))],
      DiscountPercent::new(dec!(100)).unwrap(),
      inter(dec!(28)),
    );
    assert!(breakdown.discount_amount <= breakdown.subtotal);
  }

  #[test]
  fn test_rounding_is_idempotent() {
    for value in [dec!(944.99), dec!(945.5), dec!(0.49), dec!(1180), dec!(12.01)] {
      assert_eq!(round_half_up(round_half_up(value)), round_half_up(value));
    }
  }

  #[test]
  fn test_rounding_half_goes_up() {
    assert_eq!(round_half_up(dec!(944.5)), dec!(945));
    assert_eq!(round_half_up(dec!(944.49)), dec!(944));
    assert_eq!(round_half_up(dec!(944.51)), dec!(945));
  }

  #[test]
  fn test_untaxed_challan_pipeline() {
    let breakdown = AmountBreakdown::compute_untaxed(
      &[item(dec!(10), dec!(200))],
      DiscountPercent::new(dec!(10)).unwrap(),
    );
    assert_eq!(breakdown.subtotal, dec!(2000));
    assert_eq!(breakdown.discount_amount, dec!(200));
    assert_eq!(breakdown.taxable_amount, dec!(1800));
    assert_eq!(breakdown.gst_rate, dec!(0));
    assert_eq!(breakdown.total, dec!(1800));
  }
}
