use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::itemset::Itemset;

/// One basket. Set semantics: an item bought twice counts once.
pub type Transaction = BTreeSet<String>;

/// Ordered, read-only list of transactions.
///
/// Empty transactions are kept: they count towards the database size, and
/// so towards every support fraction, but towards no support count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDatabase {
    transactions: Vec<Transaction>,
}

impl TransactionDatabase {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        TransactionDatabase { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Number of distinct items across all transactions.
    pub fn num_items(&self) -> usize {
        self.transactions
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Counts the transactions containing `itemset` by scanning the whole
    /// database. Independent of any miner.
    pub fn support_count(&self, itemset: &Itemset) -> u32 {
        self.transactions
            .iter()
            .filter(|transaction| itemset.iter().all(|item| transaction.contains(item)))
            .count() as u32
    }
}

impl<T, S> FromIterator<T> for TransactionDatabase
where
    T: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TransactionDatabase::new(
            iter.into_iter()
                .map(|transaction| transaction.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
