//! Association rules derived from a frequent itemset table.

pub mod rule;
pub mod search;

pub use rule::AssociationRule;
pub use search::{generate_rules, sort_rules};
