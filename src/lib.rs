//! Frequent itemset and association rule mining over market baskets.
//!
//! ```
//! use basket_miner::{generate_rules, mine, Itemset, TransactionDatabase};
//!
//! let database: TransactionDatabase = vec![
//!     vec!["a", "b", "c"],
//!     vec!["a", "b"],
//!     vec!["a", "c"],
//!     vec!["a"],
//! ]
//! .into_iter()
//! .collect();
//!
//! let table = mine(&database, 0.5).unwrap();
//! assert_eq!(table.support_count(&Itemset::new(["a", "b"])), Some(2));
//!
//! let rules = generate_rules(&table, 0.6).unwrap();
//! assert_eq!(rules.len(), 2);
//! ```

mod combi;
pub mod compare;
pub mod config;
mod database;
mod encode;
mod error;
mod itemset;
pub mod itemsets;
pub mod rules;
mod table;
mod types;
#[cfg(feature = "python")]
mod wrapper;

pub use compare::{compare, Comparison, StrategyRun};
pub use config::MiningConfig;
pub use database::{Transaction, TransactionDatabase};
pub use error::{MiningError, Result};
pub use itemset::Itemset;
pub use itemsets::{mine, mine_with, MiningOptions, Strategy};
pub use rules::{generate_rules, sort_rules, AssociationRule};
pub use table::{FrequentItemset, FrequentItemsetTable, LevelCounts};

/// Mines `database` and derives its rules as configured, rules in canonical
/// order.
pub fn mine_rules(
    database: &TransactionDatabase,
    config: &MiningConfig,
) -> Result<(FrequentItemsetTable, Vec<AssociationRule>)> {
    config.validate()?;
    let table = mine_with(database, &config.options())?;
    let mut rules = generate_rules(&table, config.min_confidence)?;
    sort_rules(&mut rules);
    Ok((table, rules))
}
