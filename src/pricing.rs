//! Buy-box pricing: purchase plans and the purchase selector
//!
//! Plans carry fixed prices; the selector tracks the chosen plan and
//! quantity and derives the displayed total on every read. All arithmetic
//! is integer cents so repeated renders never drift.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use tracing::debug;

/// Currency amount in integer cents (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create from integer cents
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Raw cents value
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Dollar/cent split for display (e.g. `(69, 99)` for $69.99)
    pub fn split(self) -> (i64, i64) {
        (self.0 / 100, (self.0 % 100).abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dollars, cents) = self.split();
        write!(f, "${}.{:02}", dollars, cents)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * i64::from(rhs))
    }
}

/// Purchase plan offered in the buy box
///
/// The enum is closed: price derivation matches on it exhaustively, so a
/// new plan cannot be added without deciding its pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchasePlan {
    /// One-time purchase, priced per pouch
    OneTime,
    /// Fixed-price 3-pouch bundle; quantity does not apply
    ThreePack,
    /// Subscribe & save, priced per pouch
    Subscription,
}

impl PurchasePlan {
    /// Unit price for per-pouch plans, bundle price for `ThreePack`
    pub fn unit_price(self) -> Money {
        match self {
            PurchasePlan::OneTime => Money::from_cents(6_999),
            PurchasePlan::ThreePack => Money::from_cents(17_847),
            PurchasePlan::Subscription => Money::from_cents(5_949),
        }
    }

    /// Struck-through reference price shown next to the discount
    ///
    /// `OneTime` carries no discount, so its reference equals its unit price.
    pub fn reference_price(self) -> Money {
        match self {
            PurchasePlan::OneTime => Money::from_cents(6_999),
            PurchasePlan::ThreePack => Money::from_cents(19_947),
            PurchasePlan::Subscription => Money::from_cents(6_999),
        }
    }

    /// Whether the displayed total scales with quantity
    pub fn scales_with_quantity(self) -> bool {
        !matches!(self, PurchasePlan::ThreePack)
    }

    /// Display label for the buy-box option
    pub fn label(self) -> &'static str {
        match self {
            PurchasePlan::OneTime => "One-time purchase",
            PurchasePlan::ThreePack => "Buy 3 & Save $21.00",
            PurchasePlan::Subscription => "Subscribe & Save 15%",
        }
    }
}

/// Buy-box state: the chosen plan and quantity
///
/// Pure state holder driven by UI events. Never calls out, never blocks,
/// never raises; the only malformed input (non-positive quantity) is
/// dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseSelector {
    plan: PurchasePlan,
    quantity: u32,
}

impl Default for PurchaseSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseSelector {
    /// New selector with the page defaults: one-time purchase, quantity 1
    pub fn new() -> Self {
        PurchaseSelector {
            plan: PurchasePlan::OneTime,
            quantity: 1,
        }
    }

    /// Currently selected plan
    pub fn plan(&self) -> PurchasePlan {
        self.plan
    }

    /// Current quantity (always >= 1)
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Select a plan; price reads reflect it immediately
    pub fn select_plan(&mut self, plan: PurchasePlan) {
        self.plan = plan;
    }

    /// Set quantity; values below 1 are dropped and the previous value kept
    pub fn set_quantity(&mut self, quantity: u32) {
        if quantity < 1 {
            debug!(quantity, "ignoring non-positive quantity");
            return;
        }
        self.quantity = quantity;
    }

    /// Displayed total for the current plan and quantity
    ///
    /// Recomputed on every read; never stored.
    pub fn current_price(&self) -> Money {
        match self.plan {
            PurchasePlan::OneTime => PurchasePlan::OneTime.unit_price() * self.quantity,
            PurchasePlan::Subscription => PurchasePlan::Subscription.unit_price() * self.quantity,
            PurchasePlan::ThreePack => PurchasePlan::ThreePack.unit_price(),
        }
    }

    /// Absolute discount versus the reference price, for the same quantity rule
    pub fn savings(&self) -> Money {
        match self.plan {
            PurchasePlan::OneTime => Money::ZERO,
            PurchasePlan::ThreePack => {
                PurchasePlan::ThreePack.reference_price() - PurchasePlan::ThreePack.unit_price()
            }
            PurchasePlan::Subscription => {
                (PurchasePlan::Subscription.reference_price()
                    - PurchasePlan::Subscription.unit_price())
                    * self.quantity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display_pads_cents() {
        assert_eq!(Money::from_cents(6_999).to_string(), "$69.99");
        assert_eq!(Money::from_cents(5_200).to_string(), "$52.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn test_default_plan_is_one_time_quantity_one() {
        let selector = PurchaseSelector::new();
        assert_eq!(selector.plan(), PurchasePlan::OneTime);
        assert_eq!(selector.quantity(), 1);
        assert_eq!(selector.current_price(), Money::from_cents(6_999));
    }

    #[test]
    fn test_three_pack_price_ignores_quantity() {
        let mut selector = PurchaseSelector::new();
        selector.select_plan(PurchasePlan::ThreePack);
        for quantity in 1..=10 {
            selector.set_quantity(quantity);
            assert_eq!(selector.current_price(), Money::from_cents(17_847));
        }
    }

    #[test]
    fn test_quantity_zero_is_dropped() {
        let mut selector = PurchaseSelector::new();
        selector.set_quantity(3);
        selector.set_quantity(0);
        assert_eq!(selector.quantity(), 3);
        assert_eq!(selector.current_price(), Money::from_cents(3 * 6_999));
    }

    #[test]
    fn test_select_plan_is_idempotent() {
        let mut a = PurchaseSelector::new();
        let mut b = PurchaseSelector::new();
        a.select_plan(PurchasePlan::Subscription);
        b.select_plan(PurchasePlan::Subscription);
        b.select_plan(PurchasePlan::Subscription);
        assert_eq!(a, b);
    }

    #[test]
    fn test_subscription_savings_scale_with_quantity() {
        let mut selector = PurchaseSelector::new();
        selector.select_plan(PurchasePlan::Subscription);
        selector.set_quantity(2);
        // 15% off $69.99 is $10.50 per pouch
        assert_eq!(selector.savings(), Money::from_cents(2_100));
    }
}
