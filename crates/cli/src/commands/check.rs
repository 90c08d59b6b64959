use anyhow::{Context, Result};
use widecopy_core::services::{default_provider_registry, CheckReport, Checker};

use crate::commands::AnalysisArgs;

/// Report every function that passes a wide struct by value.
///
/// Prints one line per copy site (or a JSON array) and hands the report back
/// so the caller can pick the exit status.
pub fn check_command(args: &AnalysisArgs, json: bool) -> Result<CheckReport> {
    let config = args.size_config()?;
    let path = args.graph_path()?;
    let registry = default_provider_registry();
    let provider = registry.select(args.format.as_deref(), &path)?;
    let pattern = args.unit_pattern();

    let report = Checker::new(&config)
        .with_units(pattern.as_ref())
        .check_source(provider, &path)
        .with_context(|| format!("Unable to check {}", args.graph))?;

    if json {
        let serialized = serde_json::to_string_pretty(&report.diagnostics)
            .context("Failed to serialize diagnostics to JSON")?;
        println!("{}", serialized);
    } else {
        for line in report.lines() {
            println!("{line}");
        }
    }

    Ok(report)
}
