use std::collections::BTreeSet;

use itertools::Itertools;

use crate::types::{ItemId, ItemIds, ItemsetCounts};

/// Candidates of size k: every k-combination of the items that occur in
/// any frequent (k-1)-itemset.
pub fn union_combinations(prev: &ItemsetCounts, size: usize) -> Vec<ItemIds> {
    let unique_items: BTreeSet<ItemId> = prev.keys().flatten().copied().collect();

    // Combinations of an ordered source are themselves sorted.
    unique_items.into_iter().combinations(size).collect()
}

/// Joins (k-1)-itemsets sharing their first k-2 items into k-itemsets.
///
/// https://github.com/tommyod/Efficient-Apriori/blob/master/efficient_apriori/itemsets.py
pub fn join_step(mut itemsets: Vec<ItemIds>) -> Vec<ItemIds> {
    itemsets.retain(|itemset| !itemset.is_empty());
    if itemsets.is_empty() {
        return vec![];
    }

    itemsets.sort_unstable();

    let mut joined: Vec<ItemIds> = Vec::with_capacity(itemsets.len());
    let mut tail_items: Vec<ItemId> = Vec::with_capacity(itemsets.len());

    let mut i = 0;
    while i < itemsets.len() {
        let (head, tail) = split_tail(&itemsets[i]);

        tail_items.clear();
        tail_items.push(tail);

        let mut skip = 1;
        for other in &itemsets[i + 1..] {
            let (other_head, other_tail) = split_tail(other);
            if other_head != head {
                break;
            }
            tail_items.push(other_tail);
            skip += 1;
        }

        // Tails of a sorted run ascend, so head + (a, b) stays sorted.
        for (&a, &b) in tail_items.iter().tuple_combinations() {
            let mut candidate = Vec::with_capacity(head.len() + 2);
            candidate.extend_from_slice(head);
            candidate.push(a);
            candidate.push(b);
            joined.push(candidate);
        }

        i += skip;
    }

    joined
}

/// Drops candidates having a (k-1)-subset that is not frequent.
pub fn prune_step(candidates: Vec<ItemIds>, prev: &ItemsetCounts) -> Vec<ItemIds> {
    candidates
        .into_iter()
        .filter(|candidate| {
            (0..candidate.len()).all(|skip| {
                let subset: ItemIds = candidate
                    .iter()
                    .enumerate()
                    .filter(|&(position, _)| position != skip)
                    .map(|(_, &item)| item)
                    .collect();
                prev.contains_key(&subset)
            })
        })
        .collect()
}

fn split_tail(itemset: &[ItemId]) -> (&[ItemId], ItemId) {
    let (head, tail) = itemset.split_at(itemset.len() - 1);
    (head, tail[0])
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn test_join_step() {
        let triples: Vec<ItemIds> = vec![
            vec![1, 2, 5],
            vec![0, 1, 2],
            vec![1, 2, 3],
            vec![0, 2, 3],
            vec![0, 1, 3],
        ];
        let mut quadruples = join_step(triples);
        quadruples.sort_unstable();
        // [0, 2, 3] is the only triple with head [0, 2].
        assert_eq!(quadruples, vec![vec![0, 1, 2, 3], vec![1, 2, 3, 5]]);
    }

    #[test]
    fn test_join_step_unsorted_input() {
        let itemsets: Vec<ItemIds> =
            vec![vec![2, 3], vec![1, 2], vec![1, 4], vec![1, 3], vec![3, 4]];
        let mut y = join_step(itemsets);
        y.sort_unstable();
        // [2, 3] and [3, 4] have no partner sharing their head.
        assert_eq!(y, vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 3, 4]]);
    }

    #[test]
    fn test_join_step_singletons() {
        let y = join_step(vec![vec![7], vec![3], vec![5]]);
        assert_eq!(y, vec![vec![3, 5], vec![3, 7], vec![5, 7]]);
    }

    #[test]
    fn test_join_step_empty() {
        assert!(join_step(vec![]).is_empty());
    }

    #[test]
    fn test_prune_step() {
        let prev = hashmap! {
            vec![1, 2] => 3,
            vec![1, 3] => 2,
            vec![2, 3] => 2,
            vec![1, 4] => 2,
        };
        let candidates = join_step(prev.keys().cloned().collect());
        let pruned = prune_step(candidates, &prev);

        // [1, 2, 4] and [1, 3, 4] need [2, 4] and [3, 4].
        assert_eq!(pruned, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_union_combinations() {
        let prev = hashmap! {
            vec![10, 11] => 2,
            vec![13, 14] => 2,
        };
        let candidates = union_combinations(&prev, 3);

        assert_eq!(candidates.len(), 4);
        assert!(candidates.contains(&vec![10, 11, 13]));
        assert!(candidates.contains(&vec![11, 13, 14]));
    }

    #[test]
    fn test_union_combinations_from_1_itemsets() {
        let prev = hashmap! {
            vec![10] => 0,
            vec![13] => 0,
            vec![14] => 0,
        };
        let candidates = union_combinations(&prev, 2);

        assert_eq!(candidates, vec![vec![10, 13], vec![10, 14], vec![13, 14]]);
    }
}
