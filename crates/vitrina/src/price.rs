//! Order total reconciliation.
//!
//! Reconciles the subtotal/tax/total the site displays against the values
//! the fixed tax rate predicts. Rounding is applied once per derived value:
//! tax is computed from the raw subtotal and rounded, and the total is the
//! subtotal plus that already-rounded tax, rounded again. Comparison is
//! exact on 2-decimal values, not tolerance based.

use crate::logger::VerificationLog;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// Sales tax rate applied by the storefront
pub const TAX_RATE: f64 = 0.08;

/// Round to 2 decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extract the first dollar amount from a label like `"Item total: $49.99"`.
///
/// Returns `None` when no amount is present.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    static AMOUNT: OnceLock<regex::Regex> = OnceLock::new();
    let amount = AMOUNT.get_or_init(|| {
        regex::Regex::new(r"\$?([0-9]+(?:\.[0-9]{1,2})?)").expect("valid amount pattern")
    });
    amount
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// A subtotal/tax/total triple, 2-decimal rounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Item subtotal before tax
    pub subtotal: f64,
    /// Tax amount
    pub tax: f64,
    /// Grand total
    pub total: f64,
}

impl OrderSummary {
    /// Create a summary from raw values, rounding each to 2 decimals
    #[must_use]
    pub fn new(subtotal: f64, tax: f64, total: f64) -> Self {
        Self {
            subtotal: round2(subtotal),
            tax: round2(tax),
            total: round2(total),
        }
    }

    /// Compute the expected summary for a subtotal.
    ///
    /// The total is derived from the rounded tax, matching the storefront's
    /// displayed arithmetic.
    #[must_use]
    pub fn expected_from_subtotal(subtotal: f64) -> Self {
        let tax = round2(subtotal * TAX_RATE);
        let total = round2(subtotal + tax);
        Self {
            subtotal: round2(subtotal),
            tax,
            total,
        }
    }

    /// Check whether displayed tax and total match this summary exactly
    #[must_use]
    pub fn matches(&self, displayed: &Self) -> bool {
        round2(displayed.tax) == self.tax && round2(displayed.total) == self.total
    }
}

/// Verification query over displayed order totals.
///
/// A mismatch is reported, not thrown: the result is a boolean and every
/// internal failure (unparsable label text) degrades to `false` with a
/// warning.
pub struct Reconciler {
    log: Arc<dyn VerificationLog>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Create a reconciler reporting through the given logger
    #[must_use]
    pub fn new(log: Arc<dyn VerificationLog>) -> Self {
        Self { log }
    }

    /// Reconcile a displayed summary against the expected arithmetic
    #[must_use]
    pub fn reconcile(&self, displayed: &OrderSummary) -> bool {
        self.log.step(&format!(
            "Reconciling totals for subtotal ${:.2}",
            displayed.subtotal
        ));
        let expected = OrderSummary::expected_from_subtotal(displayed.subtotal);

        if expected.matches(displayed) {
            self.log.pass(&format!(
                "Totals match: subtotal ${:.2} + tax ${:.2} = total ${:.2}",
                displayed.subtotal, displayed.tax, displayed.total
            ));
            true
        } else {
            self.log.fail(&format!(
                "Totals mismatch: tax ${:.2} (expected ${:.2}), total ${:.2} (expected ${:.2})",
                displayed.tax, expected.tax, displayed.total, expected.total
            ));
            false
        }
    }

    /// Parse the three displayed labels and reconcile them.
    ///
    /// Unparsable text degrades to `false` with a warning.
    #[must_use]
    pub fn reconcile_labels(&self, subtotal: &str, tax: &str, total: &str) -> bool {
        let parsed = (
            parse_price(subtotal),
            parse_price(tax),
            parse_price(total),
        );
        match parsed {
            (Some(subtotal), Some(tax), Some(total)) => {
                self.reconcile(&OrderSummary::new(subtotal, tax, total))
            }
            _ => {
                self.log.warn(&format!(
                    "Unparsable totals: subtotal={subtotal:?} tax={tax:?} total={total:?}"
                ));
                false
            }
        }
    }
}
