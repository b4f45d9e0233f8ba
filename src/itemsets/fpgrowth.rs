use std::collections::HashMap;

use tracing::{debug, info};

use crate::types::{
    FrequentItemsets, ItemCounts, ItemId, ItemIds, ItemsetCounts, ItemsetLength, Transaction,
};

#[derive(Debug, Clone)]
struct FpNode {
    item: Option<ItemId>,
    count: u32,
    parent: Option<usize>,
    children: HashMap<ItemId, usize>,
}

impl FpNode {
    fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: HashMap::new(),
        }
    }

    fn new_item(item: ItemId, parent: usize) -> Self {
        Self {
            item: Some(item),
            count: 0,
            parent: Some(parent),
            children: HashMap::new(),
        }
    }
}

/// Prefix tree over the frequent items of weighted paths, stored as an arena.
///
/// Each path is inserted with its items in descending order of frequency
/// (ties by id), so common prefixes share nodes.
#[derive(Debug, Clone)]
pub struct FpTree {
    nodes: Vec<FpNode>,
    header_table: HashMap<ItemId, Vec<usize>>,
    item_counts: ItemCounts,
    root_index: usize,
}

impl FpTree {
    fn new(item_counts: ItemCounts) -> Self {
        Self {
            nodes: vec![FpNode::new_root()],
            header_table: HashMap::new(),
            item_counts,
            root_index: 0,
        }
    }

    /// Items whose total path weight is below `min_support_count` are left out.
    pub fn build<P: AsRef<[ItemId]>>(paths: &[(P, u32)], min_support_count: u32) -> Self {
        let mut item_counts = ItemCounts::new();
        for (path, count) in paths {
            for &item in path.as_ref() {
                *item_counts.entry(item).or_insert(0) += count;
            }
        }
        item_counts.retain(|_, &mut count| count >= min_support_count);

        let mut tree = FpTree::new(item_counts);
        let mut ordered: ItemIds = Vec::new();
        for (path, count) in paths {
            ordered.clear();
            ordered.extend(
                path.as_ref()
                    .iter()
                    .copied()
                    .filter(|item| tree.item_counts.contains_key(item)),
            );
            let counts = &tree.item_counts;
            ordered.sort_unstable_by(|a, b| counts[b].cmp(&counts[a]).then(a.cmp(b)));
            tree.insert(&ordered, *count);
        }
        tree
    }

    pub fn is_empty(&self) -> bool {
        self.header_table.is_empty()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, items: &[ItemId], count: u32) {
        let mut current = self.root_index;
        for &item in items {
            let existing = self.nodes[current].children.get(&item).copied();
            let next = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FpNode::new_item(item, current));
                    self.nodes[current].children.insert(item, child);
                    self.header_table.entry(item).or_default().push(child);
                    child
                }
            };
            self.nodes[next].count += count;
            current = next;
        }
    }

    /// Items on the way from the root down to `node`, both excluded.
    fn prefix_path(&self, node: usize) -> ItemIds {
        let mut path = Vec::new();
        let mut current = self.nodes[node].parent;
        while let Some(index) = current {
            if let Some(item) = self.nodes[index].item {
                path.push(item);
            }
            current = self.nodes[index].parent;
        }
        path.reverse();
        path
    }
}

/// Frequent itemsets by recursive conditional-tree mining, bucketed by size
/// like the level-wise miners.
pub fn generate_frequent_itemsets(
    transactions: &[Transaction],
    min_support_count: u32,
    max_len: ItemsetLength,
) -> FrequentItemsets {
    let paths: Vec<(&[ItemId], u32)> = transactions
        .iter()
        .map(|transaction| (transaction.as_slice(), 1))
        .collect();
    let tree = FpTree::build(&paths, min_support_count);
    info!(nodes = tree.num_nodes(), "built fp-tree");

    let mut found: Vec<(ItemIds, u32)> = Vec::new();
    if max_len > 0 {
        grow(&tree, &[], min_support_count, max_len, &mut found);
    }

    let mut frequent_itemsets: FrequentItemsets = vec![ItemsetCounts::new()];
    for (itemset, count) in found {
        let size = itemset.len();
        if frequent_itemsets.len() < size {
            frequent_itemsets.resize_with(size, ItemsetCounts::new);
        }
        frequent_itemsets[size - 1].insert(itemset, count);
    }
    for (index, level) in frequent_itemsets.iter().enumerate() {
        info!(size = index + 1, frequent = level.len(), "counted itemsets");
    }

    frequent_itemsets
}

fn grow(
    tree: &FpTree,
    suffix: &[ItemId],
    min_support_count: u32,
    max_len: ItemsetLength,
    found: &mut Vec<(ItemIds, u32)>,
) {
    for (&item, nodes) in &tree.header_table {
        let support = tree.item_counts[&item];
        let mut itemset: ItemIds = Vec::with_capacity(suffix.len() + 1);
        itemset.extend_from_slice(suffix);
        itemset.push(item);

        if itemset.len() < max_len {
            let base: Vec<(ItemIds, u32)> = nodes
                .iter()
                .map(|&node| (tree.prefix_path(node), tree.nodes[node].count))
                .filter(|(path, _)| !path.is_empty())
                .collect();
            let conditional = FpTree::build(&base, min_support_count);
            if !conditional.is_empty() {
                debug!(
                    size = itemset.len(),
                    nodes = conditional.num_nodes(),
                    "conditional fp-tree"
                );
                grow(&conditional, &itemset, min_support_count, max_len, found);
            }
        }

        itemset.sort_unstable();
        found.push((itemset, support));
    }
}
