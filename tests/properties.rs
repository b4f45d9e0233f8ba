//! Property-based tests for the miner and the rule generator.
//!
//! Small random basket databases are mined with every strategy and checked
//! against direct recounts over the whole item universe.

use basket_miner::{
    generate_rules, mine_with, Itemset, MiningOptions, Strategy, TransactionDatabase,
};
use itertools::Itertools;
use proptest::prelude::*;
// The glob's `Strategy` trait is shadowed by the mining strategy enum.
use proptest::strategy::Strategy as _;

const ITEMS: [&str; 6] = ["apple", "bread", "cheese", "dates", "eggs", "flour"];

fn database_strategy() -> impl proptest::strategy::Strategy<Value = TransactionDatabase> {
    let basket = prop::sample::subsequence(ITEMS.to_vec(), 0..=ITEMS.len());
    prop::collection::vec(basket, 1..12)
        .prop_map(|transactions| transactions.into_iter().collect())
}

/// A support threshold hitting an exact count, `count / n`.
fn threshold(database: &TransactionDatabase, count: usize) -> f64 {
    let n = database.len();
    count.clamp(1, n) as f64 / n as f64
}

fn every_itemset() -> Vec<Itemset> {
    (1..=ITEMS.len())
        .flat_map(|size| ITEMS.iter().copied().combinations(size))
        .map(Itemset::new)
        .collect()
}

proptest! {
    /// Every subset of a frequent itemset is frequent with at least its support.
    #[test]
    fn prop_anti_monotonicity(database in database_strategy(), count in 1usize..6) {
        let table = mine_with(&database, &MiningOptions::new(threshold(&database, count))).unwrap();

        for (itemset, support_count) in table.iter().filter(|(itemset, _)| itemset.len() > 1) {
            for size in 1..itemset.len() {
                for subset in itemset.items().iter().combinations(size) {
                    let subset = Itemset::new(subset.into_iter().cloned());
                    let subset_count = table.support_count(&subset);
                    prop_assert!(subset_count.is_some(), "{} missing", subset);
                    prop_assert!(subset_count.unwrap() >= support_count);
                }
            }
        }
    }

    /// Counts match a recount and the table holds exactly the itemsets reaching the threshold.
    #[test]
    fn prop_support_correctness(database in database_strategy(), count in 1usize..6) {
        let min_support = threshold(&database, count);
        let n = database.len() as f64;

        for strategy in Strategy::ALL {
            let options = MiningOptions::new(min_support).with_strategy(strategy);
            let table = mine_with(&database, &options).unwrap();

            for itemset in every_itemset() {
                let true_count = database.support_count(&itemset);
                let frequent = f64::from(true_count) / n >= min_support;
                if frequent {
                    prop_assert_eq!(
                        table.support_count(&itemset),
                        Some(true_count),
                        "{} {}",
                        strategy,
                        itemset
                    );
                } else {
                    prop_assert_eq!(
                        table.support_count(&itemset),
                        None,
                        "{} {}",
                        strategy,
                        itemset
                    );
                }
            }
        }
    }

    /// All strategies produce the same table.
    #[test]
    fn prop_cross_strategy_equivalence(
        database in database_strategy(),
        count in 1usize..6,
        max_len in 1usize..5
    ) {
        let min_support = threshold(&database, count);
        let tables: Vec<_> = Strategy::ALL
            .iter()
            .map(|&strategy| {
                let options = MiningOptions::new(min_support)
                    .with_strategy(strategy)
                    .with_max_len(max_len);
                mine_with(&database, &options).unwrap()
            })
            .collect();

        prop_assert_eq!(&tables[0], &tables[1]);
        prop_assert_eq!(&tables[0], &tables[2]);
        prop_assert!(tables[0].max_len() <= max_len);
    }

    /// Emitted rules pass the threshold with exactly support(A u B) / support(A).
    #[test]
    fn prop_rule_confidence(
        database in database_strategy(),
        count in 1usize..4,
        min_confidence in 0.05f64..=1.0
    ) {
        let options = MiningOptions::new(threshold(&database, count));
        let table = mine_with(&database, &options).unwrap();
        let rules = generate_rules(&table, min_confidence).unwrap();

        for rule in &rules {
            let union = rule.antecedent.union(&rule.consequent);
            prop_assert_eq!(union.len(), rule.antecedent.len() + rule.consequent.len());
            let expected = f64::from(database.support_count(&union))
                / f64::from(database.support_count(&rule.antecedent));
            prop_assert_eq!(rule.confidence, expected);
            prop_assert!(rule.confidence >= min_confidence);
        }

        // Nothing above the threshold is left out.
        for (itemset, union_count) in table.iter().filter(|(itemset, _)| itemset.len() > 1) {
            for size in 1..itemset.len() {
                for antecedent in itemset.items().iter().combinations(size) {
                    let antecedent = Itemset::new(antecedent.into_iter().cloned());
                    let confidence = f64::from(union_count)
                        / f64::from(table.support_count(&antecedent).unwrap());
                    let emitted = rules.iter().any(|rule| rule.antecedent == antecedent
                        && rule.consequent == itemset.difference(&antecedent));
                    prop_assert_eq!(emitted, confidence >= min_confidence);
                }
            }
        }
    }
}
