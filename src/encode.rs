use std::collections::{BTreeSet, HashMap};

use bitvec::prelude::*;

use crate::{
    database::TransactionDatabase,
    itemset::Itemset,
    types::{ItemId, ItemName, Transaction, TransactionColumn},
};

/// Transactions with item names replaced by dense ids.
///
/// Ids are assigned in lexicographic order of the names, so a sorted id
/// vector decodes straight into a canonical [`Itemset`].
#[derive(Debug, Clone)]
pub struct EncodedDatabase {
    inventory: Vec<ItemName>,
    transactions: Vec<Transaction>,
}

impl EncodedDatabase {
    pub fn encode(database: &TransactionDatabase) -> Self {
        let inventory: Vec<ItemName> = database
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        let reverse_lookup: HashMap<&str, ItemId> = inventory
            .iter()
            .enumerate()
            .map(|(id, name)| (name.as_str(), id))
            .collect();

        // Source transactions iterate in name order, hence the ids come out sorted.
        let transactions = database
            .iter()
            .map(|transaction| {
                transaction
                    .iter()
                    .map(|item| reverse_lookup[item.as_str()])
                    .collect()
            })
            .collect();

        EncodedDatabase {
            inventory,
            transactions,
        }
    }

    pub fn num_transactions(&self) -> usize {
        self.transactions.len()
    }

    pub fn num_items(&self) -> usize {
        self.inventory.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn name(&self, id: ItemId) -> &str {
        &self.inventory[id]
    }

    pub fn decode(&self, ids: &[ItemId]) -> Itemset {
        Itemset::from_canonical(ids.iter().map(|&id| self.name(id).to_owned()).collect())
    }

    /// Vertical layout: one bit column per item over all transactions.
    pub fn columns(&self) -> Vec<TransactionColumn> {
        let mut columns = vec![bitvec![0; self.transactions.len()]; self.inventory.len()];
        for (tid, transaction) in self.transactions.iter().enumerate() {
            for &item in transaction {
                columns[item].set(tid, true);
            }
        }
        columns
    }
}
