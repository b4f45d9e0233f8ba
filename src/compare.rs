//! Runs several strategies on the same input and compares cost and output.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::{
    config::MiningConfig,
    database::TransactionDatabase,
    error::Result,
    itemsets::{mine_with, Strategy},
    rules::{generate_rules, sort_rules, AssociationRule},
    table::FrequentItemsetTable,
};

/// Scores of equivalent rules may differ by rounding only.
pub const SCORE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub table: FrequentItemsetTable,
    /// In canonical order.
    pub rules: Vec<AssociationRule>,
    pub mining_time: Duration,
    pub rules_time: Duration,
}

impl StrategyRun {
    pub fn total_time(&self) -> Duration {
        self.mining_time + self.rules_time
    }
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub runs: Vec<StrategyRun>,
}

impl Comparison {
    /// Whether every run found the same itemsets and the same rules.
    pub fn is_consistent(&self) -> bool {
        match self.runs.split_first() {
            Some((reference, others)) => others.iter().all(|run| {
                run.table == reference.table && rules_equivalent(&run.rules, &reference.rules)
            }),
            None => true,
        }
    }

    pub fn fastest(&self) -> Option<&StrategyRun> {
        self.runs.iter().min_by_key(|run| run.total_time())
    }
}

/// Equal as sets, up to [`SCORE_TOLERANCE`] on scores.
pub fn rules_equivalent(a: &[AssociationRule], b: &[AssociationRule]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    sort_by_sides(&mut a);
    sort_by_sides(&mut b);
    a.iter()
        .zip(&b)
        .all(|(x, y)| x.approx_eq(y, SCORE_TOLERANCE))
}

fn sort_by_sides(rules: &mut [AssociationRule]) {
    rules.sort_by(|x, y| {
        x.antecedent
            .cmp(&y.antecedent)
            .then_with(|| x.consequent.cmp(&y.consequent))
    });
}

/// Mines and derives rules once per strategy with the thresholds of `config`.
pub fn compare(
    database: &TransactionDatabase,
    config: &MiningConfig,
    strategies: &[Strategy],
) -> Result<Comparison> {
    config.validate()?;

    let mut runs = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        let start = Instant::now();
        let table = mine_with(database, &config.options_for(strategy))?;
        let mining_time = start.elapsed();

        let start = Instant::now();
        let mut rules = generate_rules(&table, config.min_confidence)?;
        let rules_time = start.elapsed();
        sort_rules(&mut rules);

        info!(
            %strategy,
            itemsets = table.len(),
            rules = rules.len(),
            mining_ms = mining_time.as_secs_f64() * 1e3,
            "strategy finished"
        );
        runs.push(StrategyRun {
            strategy,
            table,
            rules,
            mining_time,
            rules_time,
        });
    }

    let comparison = Comparison { runs };
    if !comparison.is_consistent() {
        warn!("strategies disagree on the mined output");
    }
    Ok(comparison)
}
