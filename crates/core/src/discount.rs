//! Tiered discount rules.
//!
//! A policy is a list of threshold rules plus the metric they are measured
//! against (total quantity or total amount of the selection). The applied
//! percentage comes from the highest threshold the metric reaches.
//!
//! ```
//! use rust_decimal::Decimal;
//! use stepcart_core::discount::{DiscountPolicy, discount_for_metric};
//!
//! let policy = DiscountPolicy::default();
//! assert_eq!(discount_for_metric(&policy.rules, Decimal::from(4)), Decimal::from(15));
//! assert_eq!(discount_for_metric(&policy.rules, Decimal::ZERO), Decimal::ZERO);
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::selection::SelectionAggregate;
use crate::types::round_money;

/// What a discount threshold is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMetric {
    /// Sum of the selected quantities.
    #[default]
    #[serde(alias = "Total Quantity")]
    Quantity,
    /// Sum of unit price times quantity.
    #[serde(alias = "Total Amount")]
    Amount,
}

impl fmt::Display for DiscountMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity => f.write_str("Total Quantity"),
            Self::Amount => f.write_str("Total Amount"),
        }
    }
}

/// A single tier: at `minimum_threshold` or above, take `discount_percent` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    #[serde(alias = "min")]
    pub minimum_threshold: Decimal,
    #[serde(alias = "dsp")]
    pub discount_percent: Decimal,
}

impl DiscountRule {
    /// Create a rule from whole-number threshold and percentage.
    #[must_use]
    pub fn new(minimum_threshold: i64, discount_percent: i64) -> Self {
        Self {
            minimum_threshold: Decimal::from(minimum_threshold),
            discount_percent: Decimal::from(discount_percent),
        }
    }
}

/// Discount configuration attached to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPolicy {
    #[serde(default)]
    pub metric: DiscountMetric,
    #[serde(default)]
    pub rules: Vec<DiscountRule>,
}

impl Default for DiscountPolicy {
    /// Quantity tiers of 5% from one item, 15% from three, 25% from five and
    /// 30% from seven.
    fn default() -> Self {
        Self {
            metric: DiscountMetric::Quantity,
            rules: vec![
                DiscountRule::new(1, 5),
                DiscountRule::new(3, 15),
                DiscountRule::new(5, 25),
                DiscountRule::new(7, 30),
            ],
        }
    }
}

impl DiscountPolicy {
    /// Evaluate the policy against a selection.
    #[must_use]
    pub fn evaluate(&self, aggregate: &SelectionAggregate) -> DiscountSummary {
        let total_quantity = aggregate.total_quantity();
        let subtotal = aggregate.total_amount();
        let percent = compute_discount(&self.rules, self.metric, aggregate);
        DiscountSummary {
            metric: self.metric,
            total_quantity,
            subtotal,
            percent,
            discounted_total: discounted_total(subtotal, percent),
        }
    }
}

/// Result of evaluating a policy, as shown in the selection summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSummary {
    pub metric: DiscountMetric,
    pub total_quantity: u32,
    pub subtotal: Decimal,
    pub percent: Decimal,
    /// Subtotal after the discount, rounded to cents.
    pub discounted_total: Decimal,
}

impl Default for DiscountSummary {
    fn default() -> Self {
        Self {
            metric: DiscountMetric::default(),
            total_quantity: 0,
            subtotal: Decimal::ZERO,
            percent: Decimal::ZERO,
            discounted_total: Decimal::ZERO,
        }
    }
}

/// Percentage for a metric value.
///
/// Rules are stably sorted by threshold and scanned in ascending order; the
/// last rule whose threshold is at or below `metric` wins. Among rules with
/// equal thresholds the one listed later applies. Returns zero when no rule
/// qualifies.
#[must_use]
pub fn discount_for_metric(rules: &[DiscountRule], metric: Decimal) -> Decimal {
    let mut sorted: Vec<&DiscountRule> = rules.iter().collect();
    sorted.sort_by(|a, b| a.minimum_threshold.cmp(&b.minimum_threshold));

    sorted
        .into_iter()
        .take_while(|rule| rule.minimum_threshold <= metric)
        .last()
        .map_or(Decimal::ZERO, |rule| rule.discount_percent)
}

/// Percentage for a selection, measured by `metric`.
#[must_use]
pub fn compute_discount(
    rules: &[DiscountRule],
    metric: DiscountMetric,
    aggregate: &SelectionAggregate,
) -> Decimal {
    let value = match metric {
        DiscountMetric::Quantity => Decimal::from(aggregate.total_quantity()),
        DiscountMetric::Amount => aggregate.total_amount(),
    };
    discount_for_metric(rules, value)
}

/// Apply a percentage to an amount, rounded to cents.
#[must_use]
pub fn discounted_total(amount: Decimal, percent: Decimal) -> Decimal {
    round_money(amount * (Decimal::ONE - percent / Decimal::ONE_HUNDRED))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::definition::tests::product;

    fn tiers() -> Vec<DiscountRule> {
        DiscountPolicy::default().rules
    }

    #[test]
    fn test_discount_for_metric_tiers() {
        let rules = tiers();
        assert_eq!(discount_for_metric(&rules, Decimal::from(4)), Decimal::from(15));
        assert_eq!(discount_for_metric(&rules, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(discount_for_metric(&rules, Decimal::from(10)), Decimal::from(30));
        assert_eq!(discount_for_metric(&rules, Decimal::from(5)), Decimal::from(25));
    }

    #[test]
    fn test_discount_for_metric_unsorted_rules() {
        let rules = vec![
            DiscountRule::new(7, 30),
            DiscountRule::new(1, 5),
            DiscountRule::new(5, 25),
            DiscountRule::new(3, 15),
        ];
        assert_eq!(discount_for_metric(&rules, Decimal::from(6)), Decimal::from(25));
    }

    #[test]
    fn test_discount_for_metric_equal_thresholds_later_wins() {
        let rules = vec![DiscountRule::new(2, 10), DiscountRule::new(2, 12)];
        assert_eq!(discount_for_metric(&rules, Decimal::from(2)), Decimal::from(12));
    }

    #[test]
    fn test_discount_for_metric_no_rules() {
        assert_eq!(discount_for_metric(&[], Decimal::from(100)), Decimal::ZERO);
    }

    #[test]
    fn test_compute_discount_by_amount() {
        let mut aggregate = SelectionAggregate::default();
        aggregate.add(product(1, "30.00"));
        aggregate.add(product(1, "30.00"));

        let rules = vec![DiscountRule::new(50, 10), DiscountRule::new(100, 20)];
        assert_eq!(
            compute_discount(&rules, DiscountMetric::Amount, &aggregate),
            Decimal::from(10)
        );
        assert_eq!(
            compute_discount(&rules, DiscountMetric::Quantity, &aggregate),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_evaluate_rounds_discounted_total() {
        let mut aggregate = SelectionAggregate::default();
        for _ in 0..3 {
            aggregate.add(product(1, "3.33"));
        }
        let summary = DiscountPolicy::default().evaluate(&aggregate);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.subtotal, Decimal::new(999, 2));
        assert_eq!(summary.percent, Decimal::from(15));
        // 9.99 * 0.85 = 8.4915
        assert_eq!(summary.discounted_total, Decimal::new(849, 2));
    }

    #[test]
    fn test_evaluate_empty_selection() {
        let summary = DiscountPolicy::default().evaluate(&SelectionAggregate::default());
        assert_eq!(summary.percent, Decimal::ZERO);
        assert_eq!(summary.discounted_total, Decimal::ZERO);
    }

    #[test]
    fn test_metric_accepts_display_labels() {
        let metric: DiscountMetric = serde_json::from_str("\"Total Amount\"").unwrap();
        assert_eq!(metric, DiscountMetric::Amount);
        assert_eq!(metric.to_string(), "Total Amount");
    }

    #[test]
    fn test_rule_accepts_short_keys() {
        let rule: DiscountRule = serde_json::from_str(r#"{"min": "3", "dsp": "15"}"#).unwrap();
        assert_eq!(rule, DiscountRule::new(3, 15));
    }
}
