//! Basket file reader.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use basket_miner::TransactionDatabase;

/// Column of a CSV basket file holding the comma-separated item list.
const ITEMS_COLUMN: &str = "Items";

/// Reads transactions from `path`.
///
/// - `.json`: an array of arrays of item names.
/// - `.csv`: a header row and an `Items` column whose (usually quoted) field
///   lists the items of one transaction, separated by commas. Other columns
///   such as transaction ids are ignored.
/// - anything else: one transaction per line with comma-separated items;
///   blank lines and lines starting with `#` are skipped.
pub fn read_baskets(path: &Path) -> Result<TransactionDatabase> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read basket file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => {
            let transactions: Vec<Vec<String>> = serde_json::from_str(&source)
                .with_context(|| format!("failed to parse {} as JSON baskets", path.display()))?;
            Ok(transactions.into_iter().collect())
        }
        Some("csv") => parse_csv(&source)
            .with_context(|| format!("failed to parse {} as CSV baskets", path.display())),
        _ => Ok(parse_lines(&source)),
    }
}

fn split_items(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_csv(source: &str) -> Result<TransactionDatabase> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source.as_bytes());

    let headers = reader.headers().context("missing CSV header row")?;
    let column = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(ITEMS_COLUMN))
        .with_context(|| format!("no `{ITEMS_COLUMN}` column in header {headers:?}"))?;

    let mut transactions = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Row 1 is the header.
        let record = record.with_context(|| format!("malformed CSV row {}", index + 2))?;
        transactions.push(split_items(record.get(column).unwrap_or_default()));
    }
    Ok(transactions.into_iter().collect())
}

fn parse_lines(source: &str) -> TransactionDatabase {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(split_items)
        .collect()
}
