use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyFrozenSet};

use crate::{
    generate_rules, mine_with, sort_rules, AssociationRule, FrequentItemsetTable, MiningError,
    MiningOptions, Strategy, TransactionDatabase,
};

impl From<MiningError> for PyErr {
    fn from(err: MiningError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Association rule as seen from Python.
#[pyclass]
#[derive(Clone)]
pub struct Rule {
    #[pyo3(get)]
    antecedent: Vec<String>,
    #[pyo3(get)]
    consequent: Vec<String>,
    #[pyo3(get)]
    support: f64,
    #[pyo3(get)]
    confidence: f64,
    #[pyo3(get)]
    lift: f64,
    #[pyo3(get)]
    leverage: f64,
    #[pyo3(get)]
    conviction: f64,
}

#[pymethods]
impl Rule {
    fn __repr__(&self) -> String {
        format!(
            "Rule({:?} => {:?}, support={:.3}, confidence={:.3}, lift={:.3})",
            self.antecedent, self.consequent, self.support, self.confidence, self.lift
        )
    }
}

impl From<AssociationRule> for Rule {
    fn from(rule: AssociationRule) -> Self {
        Rule {
            antecedent: rule.antecedent.into(),
            consequent: rule.consequent.into(),
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
            leverage: rule.leverage,
            conviction: rule.conviction,
        }
    }
}

fn options(min_support: f64, strategy: &str, max_len: Option<usize>) -> PyResult<MiningOptions> {
    Ok(MiningOptions {
        min_support,
        strategy: strategy.parse::<Strategy>()?,
        max_len,
    })
}

fn convert_itemset_counts(py: Python<'_>, table: &FrequentItemsetTable) -> PyResult<Py<PyDict>> {
    let levels = PyDict::new(py);
    for (index, level) in table.levels().iter().enumerate() {
        let itemset_counts = PyDict::new(py);
        for (itemset, &count) in level {
            itemset_counts.set_item(PyFrozenSet::new(py, itemset.items())?, count)?;
        }
        levels.set_item(index + 1, itemset_counts)?;
    }
    Ok(levels.into())
}

/// Frequent itemsets as `{size: {frozenset: count}}`.
#[pyfunction]
#[pyo3(signature = (transactions, min_support, strategy = "apriori", max_len = None))]
fn mine_itemsets(
    py: Python<'_>,
    transactions: Vec<Vec<String>>,
    min_support: f64,
    strategy: &str,
    max_len: Option<usize>,
) -> PyResult<Py<PyDict>> {
    let options = options(min_support, strategy, max_len)?;
    let database: TransactionDatabase = transactions.into_iter().collect();
    let table = py.allow_threads(|| mine_with(&database, &options))?;
    convert_itemset_counts(py, &table)
}

/// Rules in canonical order.
#[pyfunction]
#[pyo3(
    signature = (transactions, min_support, min_confidence, strategy = "apriori", max_len = None)
)]
fn association_rules(
    py: Python<'_>,
    transactions: Vec<Vec<String>>,
    min_support: f64,
    min_confidence: f64,
    strategy: &str,
    max_len: Option<usize>,
) -> PyResult<Vec<Rule>> {
    let options = options(min_support, strategy, max_len)?;
    let database: TransactionDatabase = transactions.into_iter().collect();
    let rules = py.allow_threads(|| -> Result<Vec<AssociationRule>, MiningError> {
        let table = mine_with(&database, &options)?;
        let mut rules = generate_rules(&table, min_confidence)?;
        sort_rules(&mut rules);
        Ok(rules)
    })?;
    Ok(rules.into_iter().map(Rule::from).collect())
}

#[pymodule]
fn basket_miner(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mine_itemsets, m)?)?;
    m.add_function(wrap_pyfunction!(association_rules, m)?)?;
    m.add_class::<Rule>()?;
    Ok(())
}
