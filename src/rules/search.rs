use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    error::{check_threshold, MiningError, Result},
    itemset::Itemset,
    rules::rule::AssociationRule,
    table::FrequentItemsetTable,
};

/// Generate rules from every frequent itemset of size two or more.
///
/// Counts come from the table alone; a missing subset count fails with
/// [`MiningError::MissingSubsetSupport`]. Output order is unspecified, see
/// [`sort_rules`].
pub fn generate_rules(
    table: &FrequentItemsetTable,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>> {
    check_threshold("min_confidence", min_confidence)?;

    let patterns: Vec<(&Itemset, u32)> = table
        .iter()
        .filter(|(itemset, _)| itemset.len() > 1)
        .collect();
    let num_patterns = patterns.len();
    info!(num_patterns, min_confidence, "generating rules");

    let rules: Vec<Vec<AssociationRule>> = patterns
        .par_iter()
        .map(|&(pattern, count)| rules_from_pattern(table, pattern, count, min_confidence))
        .collect::<Result<_>>()?;

    let rules: Vec<AssociationRule> = rules.into_iter().flatten().collect();
    info!(rules = rules.len(), "generated rules");
    Ok(rules)
}

/// Rules splitting one frequent itemset, smallest consequents first.
///
/// Moving items from antecedent to consequent never raises confidence, so a
/// consequent containing one already rejected is skipped.
fn rules_from_pattern(
    table: &FrequentItemsetTable,
    pattern: &Itemset,
    union_count: u32,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>> {
    let mut rules = Vec::new();
    let mut blacklist: Vec<Itemset> = Vec::new();

    let items = pattern.items();
    for consequent_len in 1..items.len() {
        for consequent in items.iter().cloned().combinations(consequent_len) {
            let consequent = Itemset::from_canonical(consequent);
            if blacklist
                .iter()
                .any(|rejected| rejected.is_subset(&consequent))
            {
                continue;
            }

            let antecedent = pattern.difference(&consequent);
            let antecedent_count = lookup(table, &antecedent)?;
            let confidence = f64::from(union_count) / f64::from(antecedent_count);

            if confidence >= min_confidence {
                let consequent_count = lookup(table, &consequent)?;
                rules.push(AssociationRule::from_counts(
                    antecedent,
                    consequent,
                    union_count,
                    antecedent_count,
                    consequent_count,
                    table.num_transactions(),
                ));
            } else {
                debug!(%antecedent, %consequent, confidence, "blacklisting consequent");
                blacklist.push(consequent);
            }
        }
    }

    Ok(rules)
}

fn lookup(table: &FrequentItemsetTable, itemset: &Itemset) -> Result<u32> {
    table
        .support_count(itemset)
        .ok_or_else(|| MiningError::MissingSubsetSupport(itemset.clone()))
}

/// Canonical order: confidence, then support, both descending, then
/// antecedent and consequent.
pub fn sort_rules(rules: &mut [AssociationRule]) {
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.support.total_cmp(&a.support))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}
