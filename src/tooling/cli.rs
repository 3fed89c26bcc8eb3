//! CLI Tooling
//!
//! Command-line interface over the sled-backed store: seed preservation
//! records, run reindexing passes, and inspect the resulting index.

use crate::config::{ConfigLoader, IndexerConfig, ReindexConfig};
use crate::error::IndexerError;
use crate::indexer::NestingIndexer;
use crate::logging::LoggingConfig;
use crate::reindex::{ReindexMode, ReindexReport};
use crate::store::persistence::SledStore;
use crate::store::{IndexRecord, PreservationRecord};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

/// Nesting index CLI - transitive membership index for repository objects
#[derive(Parser)]
#[command(name = "nesting-index")]
#[command(about = "Maintain a derived index of transitive parent/child membership")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (overrides storage.path from config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rebuild index records starting from an object
    Reindex {
        /// Object id to start from
        id: String,
        /// Remaining-hops budget for the seed (overrides reindex.hop_ceiling)
        #[arg(long)]
        hop_ceiling: Option<u32>,
        /// Only rebuild the object's descendants, not the object itself
        #[arg(long)]
        descendants_only: bool,
        /// Fail as soon as an id is reached through its own descendants
        #[arg(long)]
        strict: bool,
    },
    /// Show an object's index record
    Show {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the indexed children of an object
    Children {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Set an object's declared parents in the preservation tree
    Preserve {
        id: String,
        /// Parent id (repeatable; omit for an orphan)
        #[arg(long = "parent")]
        parents: Vec<String>,
    },
    /// Drop every index record
    ClearIndex,
}

/// Name used in logs for a command
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Reindex { .. } => "reindex",
        Commands::Show { .. } => "show",
        Commands::Children { .. } => "children",
        Commands::Preserve { .. } => "preserve",
        Commands::ClearIndex => "clear-index",
    }
}

/// CLI context holding the opened store and loaded configuration
pub struct CliContext {
    store: SledStore,
    config: IndexerConfig,
}

impl CliContext {
    /// Load configuration and open the store it names
    pub fn new(store_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, IndexerError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        let path = config.storage.resolve_path(store_path)?;
        let store = SledStore::open(&path)?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: SledStore, config: IndexerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, IndexerError> {
        info!(command = command_name(command), "Executing command");
        let output = match command {
            Commands::Reindex {
                id,
                hop_ceiling,
                descendants_only,
                strict,
            } => {
                let mut reindex = self.config.reindex.clone();
                if let Some(ceiling) = hop_ceiling {
                    reindex.hop_ceiling = *ceiling;
                }
                reindex.strict_cycle_detection |= *strict;
                let mode = if *descendants_only {
                    ReindexMode::DescendantsOnly
                } else {
                    ReindexMode::Full
                };
                let report = self.indexer(reindex).reindex(id, mode)?;
                format_report(&report)
            }
            Commands::Show { id, format } => {
                let record = self.indexer(self.config.reindex.clone()).find_index_record(id)?;
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(&record)?,
                    "text" => format_record_text(&record),
                    other => return Err(invalid_format(other)),
                }
            }
            Commands::Children { id, format } => {
                let children = self.indexer(self.config.reindex.clone()).children_of(id)?;
                match format.as_str() {
                    "json" => {
                        let ids: Vec<&str> = children.iter().map(|r| r.id.as_str()).collect();
                        serde_json::to_string_pretty(&ids)?
                    }
                    "text" if children.is_empty() => format!("No indexed children of {}", id),
                    "text" => children
                        .iter()
                        .map(|r| r.id.as_str())
                        .collect::<Vec<_>>()
                        .join("\n"),
                    other => return Err(invalid_format(other)),
                }
            }
            Commands::Preserve { id, parents } => {
                let record = PreservationRecord::new(id.clone(), parents.iter().cloned());
                self.store.put_preservation_record(&record)?;
                if record.parent_ids.is_empty() {
                    format!("Preserved {} as an orphan", record.id)
                } else {
                    format!(
                        "Preserved {} under {}",
                        record.id,
                        join_set(&record.parent_ids, ", ")
                    )
                }
            }
            Commands::ClearIndex => {
                self.indexer(self.config.reindex.clone()).clear_index()?;
                "Index cleared".to_string()
            }
        };
        self.store.flush()?;
        Ok(output)
    }

    fn indexer(&self, reindex: ReindexConfig) -> NestingIndexer<SledStore, SledStore> {
        NestingIndexer::new(self.store.clone(), self.store.clone(), reindex)
    }
}

fn invalid_format(format: &str) -> IndexerError {
    IndexerError::ConfigError(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}

fn join_set(items: &BTreeSet<String>, separator: &str) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(separator)
}

fn format_report(report: &ReindexReport) -> String {
    let mut lines = vec![format!(
        "Reindexed {} record(s) from {} ({}) in {} ms",
        report.written_count(),
        report.start_id,
        report.mode,
        report.duration_ms
    )];
    lines.extend(report.written.iter().map(|id| format!("  {}", id)));
    lines.join("\n")
}

fn format_record_text(record: &IndexRecord) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["id".to_string(), record.id.clone()]);
    let parents = if record.is_orphan() {
        "(orphan)".to_string()
    } else {
        join_set(&record.parent_ids, "\n")
    };
    table.add_row(vec!["parent_ids".to_string(), parents]);
    table.add_row(vec!["pathnames".to_string(), join_set(&record.pathnames, "\n")]);
    table.add_row(vec!["ancestors".to_string(), join_set(&record.ancestors, "\n")]);
    table.to_string()
}
