//! basket-miner: mine frequent itemsets and association rules from basket
//! files, or time the mining strategies against each other.

mod input;
mod report;

use std::{fs, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use basket_miner::{compare, mine_rules, MiningConfig, Strategy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "basket-miner")]
#[command(author, version, long_about = None)]
#[command(about = "Frequent itemset and association rule mining")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mine itemsets and rules with one strategy
    Mine {
        #[command(flatten)]
        run: RunArgs,

        /// Mining strategy (brute-force, apriori, fp-growth)
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run several strategies on the same baskets and compare them
    Compare {
        #[command(flatten)]
        run: RunArgs,

        /// Strategies to compare, comma-separated (default: all)
        #[arg(short, long, value_delimiter = ',')]
        strategies: Vec<Strategy>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Basket file: CSV with an `Items` column, JSON, or one comma-separated
    /// transaction per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum support, a fraction in (0, 1]
    #[arg(long)]
    min_support: Option<f64>,

    /// Minimum confidence, a fraction in (0, 1]
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Largest itemset size to explore
    #[arg(long)]
    max_len: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Mine {
            run,
            strategy,
            format,
        } => run_mine(&run, strategy, format),
        Commands::Compare { run, strategies } => run_compare(&run, strategies),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file values, overridden by command-line flags.
fn resolve_config(args: &RunArgs, strategy: Option<Strategy>) -> Result<MiningConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            MiningConfig::from_toml_str(&source)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => MiningConfig::default(),
    };

    if let Some(input) = &args.input {
        config.dataset = Some(input.clone());
    }
    if let Some(min_support) = args.min_support {
        config.min_support = min_support;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.min_confidence = min_confidence;
    }
    if let Some(max_len) = args.max_len {
        config.max_len = Some(max_len);
    }
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }

    config.validate()?;
    Ok(config)
}

fn load(config: &MiningConfig) -> Result<basket_miner::TransactionDatabase> {
    let Some(path) = &config.dataset else {
        bail!("no basket file given: pass --input or set `dataset` in the config");
    };
    let database = input::read_baskets(path)?;
    info!(
        transactions = database.len(),
        items = database.num_items(),
        path = %path.display(),
        "loaded baskets"
    );
    Ok(database)
}

fn run_mine(args: &RunArgs, strategy: Option<Strategy>, format: OutputFormat) -> Result<()> {
    let config = resolve_config(args, strategy)?;
    let database = load(&config)?;

    let start = Instant::now();
    let (table, rules) = mine_rules(&database, &config)?;
    let elapsed = start.elapsed();

    match format {
        OutputFormat::Text => report::print_text(&config, &table, &rules, elapsed)?,
        OutputFormat::Json => report::print_json(&config, &table, &rules)?,
    }
    Ok(())
}

fn run_compare(args: &RunArgs, strategies: Vec<Strategy>) -> Result<()> {
    let config = resolve_config(args, None)?;
    let database = load(&config)?;
    let strategies = if strategies.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        strategies
    };

    let comparison = compare(&database, &config, &strategies)?;
    report::print_comparison(&config, &comparison)?;
    if !comparison.is_consistent() {
        bail!("strategies produced different results");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args() -> RunArgs {
        RunArgs {
            input: Some(PathBuf::from("baskets.txt")),
            config: None,
            min_support: Some(0.3),
            min_confidence: None,
            max_len: Some(2),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let config = resolve_config(&run_args(), Some(Strategy::FpGrowth)).unwrap();

        assert_eq!(config.dataset, Some(PathBuf::from("baskets.txt")));
        assert_eq!(config.min_support, 0.3);
        assert_eq!(config.min_confidence, 0.2);
        assert_eq!(config.max_len, Some(2));
        assert_eq!(config.strategy, Strategy::FpGrowth);
    }

    #[test]
    fn invalid_flags_are_rejected() {
        let mut args = run_args();
        args.min_support = Some(1.5);
        assert!(resolve_config(&args, None).is_err());
    }

    #[test]
    fn dataset_is_required() {
        let mut args = run_args();
        args.input = None;
        let config = resolve_config(&args, None).unwrap();
        assert!(load(&config).is_err());
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "basket-miner",
            "compare",
            "--input",
            "baskets.txt",
            "--min-support",
            "0.1",
            "--strategies",
            "apriori,fp-growth",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare { strategies, run } => {
                assert_eq!(strategies, vec![Strategy::Apriori, Strategy::FpGrowth]);
                assert_eq!(run.min_support, Some(0.1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
