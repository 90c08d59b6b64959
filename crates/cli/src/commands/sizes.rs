use anyhow::{Context, Result};
use widecopy_core::services::{default_provider_registry, Checker, TypeSize};

use crate::commands::AnalysisArgs;

/// Print the computed size and alignment of every type definition.
pub fn sizes_command(args: &AnalysisArgs, json: bool) -> Result<Vec<TypeSize>> {
    let config = args.size_config()?;
    let path = args.graph_path()?;
    let registry = default_provider_registry();
    let provider = registry.select(args.format.as_deref(), &path)?;
    let pattern = args.unit_pattern();

    let rows = Checker::new(&config)
        .with_units(pattern.as_ref())
        .sizes_source(provider, &path)
        .with_context(|| format!("Unable to size types in {}", args.graph))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(rows);
    }

    println!(
        "Types (max {} bytes, word {}, align {}):",
        config.max_width, config.word_size, config.max_align
    );
    if rows.is_empty() {
        println!("(none)");
        return Ok(rows);
    }
    for row in &rows {
        let marker = if row.wide { " [wide]" } else { "" };
        println!("- {} ({}): size {}, align {}{}", row.id, row.unit, row.size, row.align, marker);
    }

    Ok(rows)
}
