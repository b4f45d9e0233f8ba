//! End-to-end runs of the mining pipeline and the comparison harness.

use basket_miner::{
    compare, generate_rules, mine, mine_rules, Itemset, MiningConfig, MiningError, Strategy,
    TransactionDatabase,
};

fn itemset(items: &[&str]) -> Itemset {
    Itemset::new(items.iter().copied())
}

fn bookstore() -> TransactionDatabase {
    vec![
        vec![
            "A Beginner's Guide",
            "Java: The Complete Reference",
            "Java For Dummies",
        ],
        vec![
            "A Beginner's Guide",
            "Java For Dummies",
            "Android Programming",
        ],
        vec![
            "Java: The Complete Reference",
            "Java For Dummies",
            "Head First Java",
        ],
        vec![
            "A Beginner's Guide",
            "Java: The Complete Reference",
            "Java For Dummies",
            "Android Programming",
        ],
        vec!["Android Programming", "Head First Java"],
        vec!["A Beginner's Guide", "Java For Dummies"],
        vec!["Java For Dummies", "Java: The Complete Reference"],
        vec!["Beginning Programming with Java", "Java For Dummies"],
    ]
    .into_iter()
    .collect()
}

#[test]
fn worked_example_end_to_end() {
    let database: TransactionDatabase = vec![
        vec!["a", "b", "c"],
        vec!["a", "b"],
        vec!["a", "c"],
        vec!["a"],
    ]
    .into_iter()
    .collect();
    let config = MiningConfig {
        min_support: 0.5,
        min_confidence: 0.6,
        ..MiningConfig::default()
    };

    let (table, rules) = mine_rules(&database, &config).unwrap();

    assert_eq!(table.len(), 5);
    assert_eq!(table.support_count(&itemset(&["b", "c"])), None);
    assert_eq!(table.support_count(&itemset(&["a", "b", "c"])), None);

    let rendered: Vec<String> = rules
        .iter()
        .map(|rule| format!("{} => {}", rule.antecedent, rule.consequent))
        .collect();
    assert_eq!(rendered, ["{b} => {a}", "{c} => {a}"]);
    assert!(rules.iter().all(|rule| rule.confidence == 1.0));
}

#[test]
fn strategies_agree_on_the_bookstore() {
    let config = MiningConfig {
        min_support: 0.25,
        min_confidence: 0.5,
        ..MiningConfig::default()
    };

    let comparison = compare(&bookstore(), &config, &Strategy::ALL).unwrap();

    assert!(comparison.is_consistent());
    let reference = &comparison.runs[0];
    assert_eq!(reference.strategy, Strategy::BruteForce);
    assert_eq!(
        reference
            .table
            .support_count(&itemset(&["A Beginner's Guide", "Java For Dummies"])),
        Some(4)
    );
    assert!(reference.rules.iter().any(|rule| {
        rule.antecedent == itemset(&["A Beginner's Guide"])
            && rule.consequent == itemset(&["Java For Dummies"])
            && rule.confidence == 1.0
    }));
}

#[test]
fn rules_are_sorted_by_confidence() {
    let config = MiningConfig {
        min_support: 0.25,
        min_confidence: 0.3,
        ..MiningConfig::default()
    };
    let (_, rules) = mine_rules(&bookstore(), &config).unwrap();

    assert!(rules
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));
}

#[test]
fn errors_surface_without_partial_results() {
    assert_eq!(
        mine(&TransactionDatabase::default(), 0.3),
        Err(MiningError::EmptyDatabase)
    );
    assert!(matches!(
        mine(&bookstore(), 0.0),
        Err(MiningError::InvalidParameter(_))
    ));

    let table = mine(&bookstore(), 0.25).unwrap();
    assert!(matches!(
        generate_rules(&table, 1.2),
        Err(MiningError::InvalidParameter(_))
    ));

    let config = MiningConfig {
        min_confidence: -0.1,
        ..MiningConfig::default()
    };
    assert!(matches!(
        mine_rules(&bookstore(), &config),
        Err(MiningError::InvalidParameter(_))
    ));
}
