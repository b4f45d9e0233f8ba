//! Human and JSON renderings of mining results.

use std::{
    io::{self, Write},
    time::Duration,
};

use anyhow::Result;
use basket_miner::{
    AssociationRule, Comparison, FrequentItemset, FrequentItemsetTable, MiningConfig, Strategy,
};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    strategy: Strategy,
    min_support: f64,
    min_confidence: f64,
    #[serde(flatten)]
    table: &'a FrequentItemsetTable,
    rules: &'a [AssociationRule],
}

pub fn print_json(
    config: &MiningConfig,
    table: &FrequentItemsetTable,
    rules: &[AssociationRule],
) -> Result<()> {
    write_json(&mut io::stdout().lock(), config, table, rules)
}

pub fn print_text(
    config: &MiningConfig,
    table: &FrequentItemsetTable,
    rules: &[AssociationRule],
    elapsed: Duration,
) -> Result<()> {
    write_text(&mut io::stdout().lock(), config, table, rules, elapsed)
}

pub fn print_comparison(config: &MiningConfig, comparison: &Comparison) -> Result<()> {
    write_comparison(&mut io::stdout().lock(), config, comparison)
}

/// Non-finite scores (conviction of certain rules) are written as `null`.
fn write_json<W: Write>(
    out: &mut W,
    config: &MiningConfig,
    table: &FrequentItemsetTable,
    rules: &[AssociationRule],
) -> Result<()> {
    let report = Report {
        strategy: config.strategy,
        min_support: config.min_support,
        min_confidence: config.min_confidence,
        table,
        rules,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn write_text<W: Write>(
    out: &mut W,
    config: &MiningConfig,
    table: &FrequentItemsetTable,
    rules: &[AssociationRule],
    elapsed: Duration,
) -> Result<()> {
    writeln!(
        out,
        "=== {} | support {:.1}% | confidence {:.1}% | {} transactions ===",
        config.strategy,
        config.min_support * 100.0,
        config.min_confidence * 100.0,
        table.num_transactions()
    )?;

    let entries = table.entries();
    for size in 1..=table.max_len() {
        let level: Vec<&FrequentItemset> = entries
            .iter()
            .filter(|entry| entry.itemset.len() == size)
            .collect();
        writeln!(out, "\nLevel {} ({} itemsets)", size, level.len())?;
        for entry in level {
            writeln!(
                out,
                "  {:<40} count {:>6}  support {:.3}",
                entry.itemset.to_string(),
                entry.support_count,
                entry.support
            )?;
        }
    }
    if table.is_empty() {
        writeln!(out, "\nNo frequent itemsets.")?;
    }

    writeln!(out, "\nRules ({})", rules.len())?;
    for rule in rules {
        writeln!(out, "  {rule}")?;
    }

    writeln!(out, "\nTime: {:.4}s", elapsed.as_secs_f64())?;
    Ok(())
}

fn write_comparison<W: Write>(
    out: &mut W,
    config: &MiningConfig,
    comparison: &Comparison,
) -> Result<()> {
    writeln!(
        out,
        "=== support {:.1}% | confidence {:.1}% ===",
        config.min_support * 100.0,
        config.min_confidence * 100.0
    )?;
    writeln!(
        out,
        "{:<12} {:>9} {:>7} {:>12} {:>12}",
        "strategy", "itemsets", "rules", "mining (s)", "rules (s)"
    )?;
    for run in &comparison.runs {
        writeln!(
            out,
            "{:<12} {:>9} {:>7} {:>12.4} {:>12.4}",
            run.strategy.name(),
            run.table.len(),
            run.rules.len(),
            run.mining_time.as_secs_f64(),
            run.rules_time.as_secs_f64()
        )?;
    }

    if let Some(fastest) = comparison.fastest() {
        writeln!(out, "\nFastest: {}", fastest.strategy)?;
    }
    let verdict = if comparison.is_consistent() { "yes" } else { "NO" };
    writeln!(out, "Consistent: {verdict}")?;
    Ok(())
}
