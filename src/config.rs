//! Typed configuration of a mining run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    error::{check_threshold, MiningError, Result},
    itemsets::{MiningOptions, Strategy},
};

/// Everything a pipeline run needs besides the transactions themselves.
///
/// ```toml
/// dataset = "baskets/amazon.txt"
/// min_support = 0.1
/// min_confidence = 0.2
/// strategy = "fp-growth"
/// max_len = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MiningConfig {
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    #[serde(default = "default_min_support")]
    pub min_support: f64,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub max_len: Option<usize>,
}

// Default value functions
fn default_min_support() -> f64 {
    0.1
}
fn default_min_confidence() -> f64 {
    0.2
}

impl Default for MiningConfig {
    fn default() -> Self {
        MiningConfig {
            dataset: None,
            min_support: default_min_support(),
            min_confidence: default_min_confidence(),
            strategy: Strategy::default(),
            max_len: None,
        }
    }
}

impl MiningConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: MiningConfig = toml::from_str(source).map_err(|err| {
            MiningError::InvalidParameter(format!("malformed configuration: {err}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.options().validate()?;
        check_threshold("min_confidence", self.min_confidence)
    }

    /// Miner parameters for `strategy`, other fields taken from `self`.
    pub fn options_for(&self, strategy: Strategy) -> MiningOptions {
        MiningOptions {
            min_support: self.min_support,
            strategy,
            max_len: self.max_len,
        }
    }

    pub fn options(&self) -> MiningOptions {
        self.options_for(self.strategy)
    }
}
