use tracing::{debug, info};

use crate::{
    combi::{join_step, prune_step, union_combinations},
    encode::EncodedDatabase,
    itemsets::count::{
        generate_frequent_1_itemset_counts, generate_frequent_k_itemset_counts,
        generate_frequent_k_itemset_counts_vertical,
    },
    types::{FrequentItemsets, ItemId, ItemIds, ItemsetCounts, ItemsetLength, TransactionColumn},
};

/// How k-candidates are derived from the frequent (k-1)-itemsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateGeneration {
    /// Every k-combination of the items seen in level k-1.
    UnionOfItems,
    /// Prefix join followed by subset pruning.
    JoinAndPrune,
}

impl CandidateGeneration {
    pub fn candidates(self, prev: &ItemsetCounts, size: ItemsetLength) -> Vec<ItemIds> {
        match self {
            CandidateGeneration::UnionOfItems => union_combinations(prev, size),
            CandidateGeneration::JoinAndPrune => {
                let joined = join_step(prev.keys().cloned().collect());
                prune_step(joined, prev)
            }
        }
    }
}

/// Where candidate supports are counted.
pub enum SupportCounter<'db> {
    /// Scan of the sorted transactions, dropping those too short to matter.
    Horizontal(Vec<&'db [ItemId]>),
    /// Intersection of per-item transaction bitsets.
    Vertical(Vec<TransactionColumn>),
}

impl<'db> SupportCounter<'db> {
    pub fn horizontal(encoded: &'db EncodedDatabase) -> Self {
        SupportCounter::Horizontal(encoded.transactions().iter().map(Vec::as_slice).collect())
    }

    pub fn vertical(encoded: &EncodedDatabase) -> Self {
        SupportCounter::Vertical(encoded.columns())
    }

    fn count(
        &mut self,
        candidates: Vec<ItemIds>,
        size: ItemsetLength,
        min_support_count: u32,
    ) -> ItemsetCounts {
        match self {
            SupportCounter::Horizontal(transactions) => {
                transactions.retain(|transaction| transaction.len() >= size);
                generate_frequent_k_itemset_counts(
                    candidates,
                    transactions.as_slice(),
                    min_support_count,
                )
            }
            SupportCounter::Vertical(columns) => {
                generate_frequent_k_itemset_counts_vertical(
                    candidates,
                    columns.as_slice(),
                    min_support_count,
                )
            }
        }
    }
}

/// Computes level `size` from level `size - 1`.
pub fn next_level(
    prev: &ItemsetCounts,
    size: ItemsetLength,
    generation: CandidateGeneration,
    counter: &mut SupportCounter<'_>,
    min_support_count: u32,
) -> ItemsetCounts {
    let candidates = generation.candidates(prev, size);
    debug!(size, candidates = candidates.len(), "counting candidates");
    counter.count(candidates, size, min_support_count)
}

/// Level-wise mining up to `max_len`. Stops at the first empty level, which
/// is not kept; level 1 is always kept.
pub fn generate_frequent_itemsets(
    encoded: &EncodedDatabase,
    min_support_count: u32,
    max_len: ItemsetLength,
    generation: CandidateGeneration,
    mut counter: SupportCounter<'_>,
) -> FrequentItemsets {
    let first = generate_frequent_1_itemset_counts(encoded.transactions(), min_support_count);
    info!(size = 1, frequent = first.len(), "counted itemsets");

    let mut frequent_itemsets: FrequentItemsets = vec![first];

    for size in 2..=max_len {
        let prev = &frequent_itemsets[size - 2];
        if prev.len() < 2 {
            break;
        }

        let level = next_level(prev, size, generation, &mut counter, min_support_count);
        info!(size, frequent = level.len(), "counted itemsets");
        if level.is_empty() {
            break;
        }
        frequent_itemsets.push(level);
    }

    frequent_itemsets
}
