use std::collections::HashMap;

use bitvec::vec::BitVec;

/// Dense id of an item. Ids follow the lexicographic order of item names, so
/// a sorted id vector decodes to a canonical itemset.
pub type ItemId = usize;
pub type ItemName = String;
/// Sorted, deduplicated item ids.
pub type ItemIds = Vec<ItemId>;

pub type Transaction = Vec<ItemId>;
/// One bit per transaction, set where the item occurs.
pub type TransactionColumn = BitVec;

pub type ItemCounts = HashMap<ItemId, u32>;
pub type ItemsetCounts = HashMap<ItemIds, u32>;

pub type ItemsetLength = usize;
/// Frequent itemsets by size; index 0 holds the 1-itemsets.
pub type FrequentItemsets = Vec<ItemsetCounts>;
