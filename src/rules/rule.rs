use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

use crate::itemset::Itemset;

/// A directional rule `antecedent => consequent` with its interest measures.
///
/// Supports are fractions of the database; `support` is that of the union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub support_count: u32,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    /// `f64::INFINITY` when the rule always holds.
    pub conviction: f64,
}

impl AssociationRule {
    /// Scores a rule from raw support counts over `num_transactions`.
    pub fn from_counts(
        antecedent: Itemset,
        consequent: Itemset,
        union_count: u32,
        antecedent_count: u32,
        consequent_count: u32,
        num_transactions: usize,
    ) -> Self {
        let n = num_transactions as f64;
        let support = f64::from(union_count) / n;
        let antecedent_support = f64::from(antecedent_count) / n;
        let consequent_support = f64::from(consequent_count) / n;
        let confidence = f64::from(union_count) / f64::from(antecedent_count);
        let conviction = if confidence >= 1.0 {
            f64::INFINITY
        } else {
            (1.0 - consequent_support) / (1.0 - confidence)
        };

        AssociationRule {
            antecedent,
            consequent,
            support_count: union_count,
            antecedent_support,
            consequent_support,
            support,
            confidence,
            lift: confidence / consequent_support,
            leverage: support - antecedent_support * consequent_support,
            conviction,
        }
    }

    /// Same rule, with every score within `tolerance`.
    pub fn approx_eq(&self, other: &AssociationRule, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| a == b || (a - b).abs() <= tolerance;
        self.antecedent == other.antecedent
            && self.consequent == other.consequent
            && self.support_count == other.support_count
            && close(self.support, other.support)
            && close(self.confidence, other.confidence)
            && close(self.lift, other.lift)
            && close(self.leverage, other.leverage)
            && close(self.conviction, other.conviction)
    }
}

impl Display for AssociationRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} => {} (support {:.3}, confidence {:.3}, lift {:.3})",
            self.antecedent, self.consequent, self.support, self.confidence, self.lift
        )
    }
}
