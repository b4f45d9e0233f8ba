//! Frequent itemset mining.

mod count;
mod fpgrowth;
mod levelwise;

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    database::TransactionDatabase,
    encode::EncodedDatabase,
    error::{check_threshold, MiningError, Result},
    itemsets::{
        count::min_support_count,
        levelwise::{CandidateGeneration, SupportCounter},
    },
    table::FrequentItemsetTable,
};

/// Algorithm used to find the frequent itemsets. All strategies produce the
/// same table for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Level-wise; candidates are all combinations of the surviving items,
    /// counted by scanning transactions.
    BruteForce,
    /// Level-wise; join-and-prune candidates, counted on transaction bitsets.
    Apriori,
    /// Prefix-tree growth without candidate generation.
    FpGrowth,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::BruteForce, Strategy::Apriori, Strategy::FpGrowth];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BruteForce => "brute-force",
            Strategy::Apriori => "apriori",
            Strategy::FpGrowth => "fp-growth",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Apriori
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "brute-force" | "bruteforce" => Ok(Strategy::BruteForce),
            "apriori" => Ok(Strategy::Apriori),
            "fp-growth" | "fpgrowth" => Ok(Strategy::FpGrowth),
            other => Err(MiningError::InvalidParameter(format!(
                "unknown strategy `{other}`, expected one of brute-force, apriori, fp-growth"
            ))),
        }
    }
}

/// Parameters of one mining run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningOptions {
    pub min_support: f64,
    pub strategy: Strategy,
    /// Largest itemset size explored; unbounded when `None`.
    pub max_len: Option<usize>,
}

impl MiningOptions {
    pub fn new(min_support: f64) -> Self {
        MiningOptions {
            min_support,
            strategy: Strategy::default(),
            max_len: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_threshold("min_support", self.min_support)?;
        if self.max_len == Some(0) {
            return Err(MiningError::InvalidParameter(
                "max_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mines every frequent itemset of `database` with the default strategy.
pub fn mine(database: &TransactionDatabase, min_support: f64) -> Result<FrequentItemsetTable> {
    mine_with(database, &MiningOptions::new(min_support))
}

/// Mines every frequent itemset of `database`.
///
/// Fails with [`MiningError::InvalidParameter`] when a threshold is out of
/// range and with [`MiningError::EmptyDatabase`] when there are no
/// transactions.
pub fn mine_with(
    database: &TransactionDatabase,
    options: &MiningOptions,
) -> Result<FrequentItemsetTable> {
    options.validate()?;
    if database.is_empty() {
        return Err(MiningError::EmptyDatabase);
    }

    let encoded = EncodedDatabase::encode(database);
    let min_support_count = min_support_count(options.min_support, encoded.num_transactions());
    // No itemset can outgrow the item universe.
    let max_len = options
        .max_len
        .unwrap_or(usize::MAX)
        .min(encoded.num_items().max(1));

    info!(
        strategy = %options.strategy,
        transactions = encoded.num_transactions(),
        items = encoded.num_items(),
        min_support_count,
        "mining frequent itemsets"
    );

    let frequent_itemsets = match options.strategy {
        Strategy::BruteForce => levelwise::generate_frequent_itemsets(
            &encoded,
            min_support_count,
            max_len,
            CandidateGeneration::UnionOfItems,
            SupportCounter::horizontal(&encoded),
        ),
        Strategy::Apriori => levelwise::generate_frequent_itemsets(
            &encoded,
            min_support_count,
            max_len,
            CandidateGeneration::JoinAndPrune,
            SupportCounter::vertical(&encoded),
        ),
        Strategy::FpGrowth => {
            fpgrowth::generate_frequent_itemsets(encoded.transactions(), min_support_count, max_len)
        }
    };

    Ok(FrequentItemsetTable::decode(&encoded, frequent_itemsets))
}
