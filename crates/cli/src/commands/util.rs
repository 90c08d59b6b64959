use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use widecopy_core::config::SizeConfig;
use widecopy_core::services::UnitPattern;

use crate::resolve_graph_path;

/// Graph selection and size-model flags shared by `check` and `sizes`.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Resolved type graph document (JSON or YAML).
    pub graph: String,

    /// Graph provider to read the document with. Defaults by file extension.
    #[arg(long)]
    pub format: Option<String>,

    /// Only analyze units whose path matches (`...` is a wildcard).
    #[arg(long)]
    pub unit: Option<String>,

    /// YAML or JSON file with `max_width`, `word_size`, `max_align`.
    #[arg(long)]
    pub config: Option<String>,

    /// Maximum size in bytes a struct can be before by-value uses are flagged.
    #[arg(long = "max")]
    pub max_width: Option<u64>,

    /// Word size to assume when calculating struct size.
    #[arg(long)]
    pub word_size: Option<u64>,

    /// Maximum alignment to assume when calculating struct size.
    #[arg(long)]
    pub max_align: Option<u64>,
}

impl AnalysisArgs {
    pub fn new(graph: impl Into<String>) -> Self {
        Self { graph: graph.into(), ..Self::default() }
    }

    /// Defaults, then the config file, then explicit flags; validated.
    pub fn size_config(&self) -> Result<SizeConfig> {
        let base = match &self.config {
            Some(path) => SizeConfig::from_file(path)?,
            None => SizeConfig::default(),
        };
        let config = base.with_overrides(self.max_width, self.word_size, self.max_align);
        config.validated().context("Invalid size configuration")
    }

    pub fn unit_pattern(&self) -> Option<UnitPattern> {
        self.unit.as_deref().map(UnitPattern::new)
    }

    /// Absolute path of the graph document; it must exist.
    pub fn graph_path(&self) -> Result<PathBuf> {
        resolve_graph_path(&self.graph)
    }
}
