use rayon::prelude::*;

use crate::types::{ItemCounts, ItemId, ItemIds, ItemsetCounts, TransactionColumn};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Smallest count `c` with `c / num_transactions >= min_support`.
///
/// `min_support * n` alone can land a hair above an integer and round up one
/// count too many (0.1 * 30), so the ceiling is corrected against the exact
/// fraction comparison the threshold is defined by.
pub fn min_support_count(min_support: f64, num_transactions: usize) -> u32 {
    let n = num_transactions as f64;
    let mut count = (min_support * n).ceil().max(0.0) as u32;
    while count > 0 && f64::from(count - 1) / n >= min_support {
        count -= 1;
    }
    while (f64::from(count) / n) < min_support {
        count += 1;
    }
    count
}

/// Counts every item and keeps those reaching `min_support_count`.
pub fn generate_frequent_1_itemset_counts<T>(
    transactions: &[T],
    min_support_count: u32,
) -> ItemsetCounts
where
    T: AsRef<[ItemId]>,
{
    let mut item_counts: ItemCounts = ItemCounts::with_capacity(APPROX_NUM_UNIQUE_ITEMS);

    for transaction in transactions {
        for &item in transaction.as_ref() {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    // Prune
    item_counts.retain(|_, &mut support_count| support_count >= min_support_count);

    convert_to_itemset_counts(item_counts)
}

/// Counts candidates against sorted transactions, one candidate per task.
///
/// A candidate gains at most one count per transaction.
pub fn generate_frequent_k_itemset_counts<T>(
    candidates: Vec<ItemIds>,
    transactions: &[T],
    min_support_count: u32,
) -> ItemsetCounts
where
    T: AsRef<[ItemId]> + Sync,
{
    candidates
        .into_par_iter()
        .filter_map(|candidate| {
            let candidate_count = transactions
                .iter()
                .filter(|transaction| is_subset(&candidate, transaction.as_ref()))
                .count() as u32;
            if candidate_count >= min_support_count {
                Some((candidate, candidate_count))
            } else {
                None
            }
        })
        .collect()
}

/// Counts candidates by intersecting the bit columns of their items.
pub fn generate_frequent_k_itemset_counts_vertical(
    candidates: Vec<ItemIds>,
    columns: &[TransactionColumn],
    min_support_count: u32,
) -> ItemsetCounts {
    candidates
        .into_par_iter()
        .filter_map(|candidate| {
            let candidate_count = column_support(&candidate, columns);
            if candidate_count >= min_support_count {
                Some((candidate, candidate_count))
            } else {
                None
            }
        })
        .collect()
}

fn column_support(candidate: &[ItemId], columns: &[TransactionColumn]) -> u32 {
    let (&first, rest) = match candidate.split_first() {
        Some(split) => split,
        None => return 0,
    };
    let mut covered = columns[first].clone();
    for &item in rest {
        covered &= columns[item].as_bitslice();
    }
    covered.count_ones() as u32
}

/// Both slices sorted ascending.
fn is_subset(candidate: &[ItemId], transaction: &[ItemId]) -> bool {
    candidate.len() <= transaction.len()
        && candidate
            .iter()
            .all(|item| transaction.binary_search(item).is_ok())
}

fn convert_to_itemset_counts(item_counts: ItemCounts) -> ItemsetCounts {
    item_counts.into_iter().map(|(k, v)| (vec![k], v)).collect()
}
