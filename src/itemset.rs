use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// A set of distinct item names in canonical (lexicographic) order.
///
/// Two itemsets built from the same members compare, hash and order equal
/// whatever order the members were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Itemset(Vec<String>);

impl Itemset {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort_unstable();
        items.dedup();
        Itemset(items)
    }

    /// Caller guarantees `items` is sorted and free of duplicates.
    pub(crate) fn from_canonical(items: Vec<String>) -> Self {
        debug_assert!(items.windows(2).all(|pair| pair[0] < pair[1]));
        Itemset(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(item))
            .is_ok()
    }

    pub fn is_subset(&self, other: &Itemset) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    /// Members of `self` absent from `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Itemset(
            self.0
                .iter()
                .filter(|item| !other.contains(item))
                .cloned()
                .collect(),
        )
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        let merged: BTreeSet<&String> = self.0.iter().chain(other.0.iter()).collect();
        Itemset(merged.into_iter().cloned().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Itemset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Itemset::new(iter)
    }
}

impl From<Vec<String>> for Itemset {
    fn from(items: Vec<String>) -> Self {
        Itemset::new(items)
    }
}

impl From<Itemset> for Vec<String> {
    fn from(itemset: Itemset) -> Self {
        itemset.0
    }
}

impl Display for Itemset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.join(", "))
    }
}
