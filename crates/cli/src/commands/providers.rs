use anyhow::Result;
use serde::Serialize;
use widecopy_core::services::default_provider_registry;

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub extensions: Vec<String>,
}

/// List the graph providers known to this binary.
pub fn list_providers_command(json: bool) -> Result<Vec<ProviderInfo>> {
    let registry = default_provider_registry();
    let entries: Vec<ProviderInfo> = registry
        .names()
        .into_iter()
        .filter_map(|name| {
            let provider = registry.get(&name)?;
            let extensions = provider.extensions().iter().map(|e| e.to_string()).collect();
            Some(ProviderInfo { name, extensions })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(entries);
    }

    println!("Providers:");
    for entry in &entries {
        println!("- {} (.{})", entry.name, entry.extensions.join(", ."));
    }

    Ok(entries)
}
