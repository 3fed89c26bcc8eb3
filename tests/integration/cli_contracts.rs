use clap::Parser;
use nesting_index::config::IndexerConfig;
use nesting_index::store::persistence::SledStore;
use nesting_index::tooling::cli::{Cli, CliContext, Commands};
use nesting_index::IndexerError;

fn context() -> CliContext {
    CliContext::with_store(SledStore::temporary().unwrap(), IndexerConfig::default())
}

fn preserve(cli: &CliContext, id: &str, parents: &[&str]) {
    cli.execute(&Commands::Preserve {
        id: id.to_string(),
        parents: parents.iter().map(|p| p.to_string()).collect(),
    })
    .unwrap();
}

fn reindex(id: &str) -> Commands {
    Commands::Reindex {
        id: id.to_string(),
        hop_ceiling: None,
        descendants_only: false,
        strict: false,
    }
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["nesting-index", "reindex", "A"],
        vec!["nesting-index", "reindex", "A", "--hop-ceiling", "30"],
        vec!["nesting-index", "reindex", "A", "--descendants-only", "--strict"],
        vec!["nesting-index", "show", "A", "--format", "json"],
        vec!["nesting-index", "children", "A"],
        vec!["nesting-index", "preserve", "C", "--parent", "A", "--parent", "B"],
        vec!["nesting-index", "preserve", "A"],
        vec!["nesting-index", "clear-index"],
        vec!["nesting-index", "--store", "/tmp/store", "show", "A"],
        vec!["nesting-index", "show", "A", "--config", "/tmp/config.toml"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_bad_arguments() {
    assert!(Cli::try_parse_from(["nesting-index", "reindex"]).is_err());
    assert!(Cli::try_parse_from(["nesting-index", "reindex", "A", "--hop-ceiling", "-1"]).is_err());
    assert!(Cli::try_parse_from(["nesting-index", "frobnicate"]).is_err());
}

#[test]
fn logging_flags_override_config() {
    let cli = Cli::try_parse_from([
        "nesting-index",
        "--verbose",
        "--log-format",
        "json",
        "clear-index",
    ])
    .unwrap();
    let logging = cli.logging_config(&IndexerConfig::default().logging);
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.format, "json");
    assert_eq!(logging.output, "stderr");
}

#[test]
fn preserve_reindex_show_round() {
    let cli = context();
    preserve(&cli, "A", &[]);
    preserve(&cli, "B", &["A"]);
    cli.execute(&reindex("A")).unwrap();
    let output = cli.execute(&reindex("B")).unwrap();
    assert!(output.starts_with("Reindexed 1 record(s) from B (full)"));

    let json = cli
        .execute(&Commands::Show {
            id: "B".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pathnames"], serde_json::json!(["A/B"]));
    assert_eq!(value["ancestors"], serde_json::json!(["A"]));

    let text = cli
        .execute(&Commands::Show {
            id: "B".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("pathnames"));
    assert!(text.contains("A/B"));
    assert!(!text.contains("(orphan)"));

    let root = cli
        .execute(&Commands::Show {
            id: "A".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(root.contains("(orphan)"));

    let children = cli
        .execute(&Commands::Children {
            id: "A".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(children, "B");
}

#[test]
fn cycle_surfaces_as_error() {
    let cli = context();
    preserve(&cli, "A", &[]);
    preserve(&cli, "B", &["A"]);
    cli.execute(&reindex("A")).unwrap();
    cli.execute(&reindex("B")).unwrap();
    preserve(&cli, "A", &["B"]);

    let err = cli
        .execute(&Commands::Reindex {
            id: "A".to_string(),
            hop_ceiling: Some(3),
            descendants_only: false,
            strict: false,
        })
        .unwrap_err();
    assert!(err.is_cycle());

    let err = cli
        .execute(&Commands::Reindex {
            id: "A".to_string(),
            hop_ceiling: None,
            descendants_only: false,
            strict: true,
        })
        .unwrap_err();
    assert!(matches!(err.root_cause(), IndexerError::CycleConfirmed { .. }));
}

#[test]
fn clear_index_then_show_is_not_found() {
    let cli = context();
    preserve(&cli, "A", &[]);
    cli.execute(&reindex("A")).unwrap();
    assert_eq!(cli.execute(&Commands::ClearIndex).unwrap(), "Index cleared");

    let err = cli
        .execute(&Commands::Show {
            id: "A".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, IndexerError::NotFound { .. }));
}

#[test]
fn unknown_output_format_is_rejected() {
    let cli = context();
    preserve(&cli, "A", &[]);
    cli.execute(&reindex("A")).unwrap();
    let err = cli
        .execute(&Commands::Show {
            id: "A".to_string(),
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, IndexerError::ConfigError(_)));
}
