use std::collections::HashMap;

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

use crate::{encode::EncodedDatabase, itemset::Itemset, types::FrequentItemsets};

/// Counts of one size level, keyed by canonical itemset.
pub type LevelCounts = HashMap<Itemset, u32>;

/// Frequent itemsets with their support counts, partitioned by size.
///
/// Level 1 is always present, possibly empty. Every later level is
/// non-empty: mining stops at the first size with no frequent itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemsetTable {
    num_transactions: usize,
    levels: Vec<LevelCounts>,
}

/// A flattened table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    pub support_count: u32,
    pub support: f64,
}

impl FrequentItemsetTable {
    /// Builds a table from counts produced elsewhere. Empty itemsets are
    /// ignored.
    pub fn from_counts<I>(num_transactions: usize, counts: I) -> Self
    where
        I: IntoIterator<Item = (Itemset, u32)>,
    {
        let mut levels = vec![LevelCounts::new()];
        for (itemset, count) in counts {
            let size = itemset.len();
            if size == 0 {
                continue;
            }
            if levels.len() < size {
                levels.resize_with(size, LevelCounts::new);
            }
            levels[size - 1].insert(itemset, count);
        }
        FrequentItemsetTable {
            num_transactions,
            levels,
        }
    }

    pub(crate) fn decode(encoded: &EncodedDatabase, frequent_itemsets: FrequentItemsets) -> Self {
        let mut levels: Vec<LevelCounts> = frequent_itemsets
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|(ids, count)| (encoded.decode(&ids), count))
                    .collect()
            })
            .collect();
        if levels.is_empty() {
            levels.push(LevelCounts::new());
        }
        FrequentItemsetTable {
            num_transactions: encoded.num_transactions(),
            levels,
        }
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn levels(&self) -> &[LevelCounts] {
        &self.levels
    }

    /// The itemsets of size `size`, if that level was reached.
    pub fn level(&self, size: usize) -> Option<&LevelCounts> {
        size.checked_sub(1).and_then(|index| self.levels.get(index))
    }

    /// Size of the largest frequent itemset, 0 when nothing is frequent.
    pub fn max_len(&self) -> usize {
        self.levels
            .iter()
            .rposition(|level| !level.is_empty())
            .map_or(0, |index| index + 1)
    }

    /// Total number of frequent itemsets over all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn support_count(&self, itemset: &Itemset) -> Option<u32> {
        self.level(itemset.len())?.get(itemset).copied()
    }

    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        let count = self.support_count(itemset)?;
        Some(self.fraction(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, u32)> {
        self.levels
            .iter()
            .flat_map(|level| level.iter().map(|(itemset, &count)| (itemset, count)))
    }

    /// All entries ordered by size, then canonical itemset.
    pub fn entries(&self) -> Vec<FrequentItemset> {
        let mut entries: Vec<FrequentItemset> = self
            .iter()
            .map(|(itemset, count)| FrequentItemset {
                itemset: itemset.clone(),
                support_count: count,
                support: self.fraction(count),
            })
            .collect();
        entries.sort_by(|a, b| {
            a.itemset
                .len()
                .cmp(&b.itemset.len())
                .then_with(|| a.itemset.cmp(&b.itemset))
        });
        entries
    }

    pub(crate) fn fraction(&self, count: u32) -> f64 {
        f64::from(count) / self.num_transactions as f64
    }
}

/// Serializes as `num_transactions` plus the ordered [`entries`] list.
///
/// [`entries`]: FrequentItemsetTable::entries
impl Serialize for FrequentItemsetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut table = serializer.serialize_struct("FrequentItemsetTable", 2)?;
        table.serialize_field("num_transactions", &self.num_transactions)?;
        table.serialize_field("itemsets", &self.entries())?;
        table.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FrequentItemsetTable {
        FrequentItemsetTable::from_counts(
            4,
            vec![
                (Itemset::new(["a"]), 4),
                (Itemset::new(["b"]), 2),
                (Itemset::new(["a", "b"]), 2),
            ],
        )
    }

    #[test]
    fn lookups() {
        let table = table();

        assert_eq!(table.len(), 3);
        assert_eq!(table.max_len(), 2);
        assert_eq!(table.support_count(&Itemset::new(["b", "a"])), Some(2));
        assert_eq!(table.support(&Itemset::new(["a"])), Some(1.0));
        assert_eq!(table.support_count(&Itemset::new(["c"])), None);
        assert_eq!(table.support_count(&Itemset::new(["a", "b", "c"])), None);
        assert!(table.level(0).is_none());
        assert!(table.level(3).is_none());
    }

    #[test]
    fn entries_are_ordered() {
        let entries = table().entries();
        let itemsets: Vec<String> = entries.iter().map(|e| e.itemset.to_string()).collect();

        assert_eq!(itemsets, ["{a}", "{b}", "{a, b}"]);
        assert_eq!(entries[2].support, 0.5);
    }

    #[test]
    fn serializes_as_ordered_entries() {
        let json = serde_json::to_value(table()).unwrap();

        assert_eq!(json["num_transactions"], 4);
        let itemsets = json["itemsets"].as_array().unwrap();
        assert_eq!(itemsets.len(), 3);
        assert_eq!(itemsets[0]["itemset"], serde_json::json!(["a"]));
        assert_eq!(itemsets[2]["itemset"], serde_json::json!(["a", "b"]));
        assert_eq!(itemsets[2]["support_count"], 2);
        assert_eq!(itemsets[2]["support"], 0.5);
    }

    #[test]
    fn empty_table_keeps_level_1() {
        let table = FrequentItemsetTable::from_counts(3, vec![]);

        assert!(table.is_empty());
        assert_eq!(table.levels().len(), 1);
        assert_eq!(table.max_len(), 0);
    }
}
