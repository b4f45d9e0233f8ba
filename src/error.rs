use thiserror::Error;

use crate::itemset::Itemset;

/// Errors raised by the miner and the rule generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    /// A threshold is out of range or an input container is malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("transaction database is empty")]
    EmptyDatabase,

    /// The table lacks the count of a subset of one of its own itemsets.
    #[error("support count of {0} is missing from the frequent itemset table")]
    MissingSubsetSupport(Itemset),
}

pub type Result<T> = std::result::Result<T, MiningError>;

/// Thresholds are fractions in (0, 1]. NaN is rejected.
pub(crate) fn check_threshold(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidParameter(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_in_range() {
        assert!(check_threshold("min_support", 1.0).is_ok());
        assert!(check_threshold("min_support", 0.0001).is_ok());
    }

    #[test]
    fn thresholds_out_of_range() {
        for value in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_threshold("min_confidence", value),
                Err(MiningError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn message_names_the_parameter() {
        let err = check_threshold("min_support", 2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter: min_support must be in (0, 1], got 2"
        );
    }
}
