use std::collections::HashMap;
use std::path::Path;

use crate::analysis::ResolutionError;
use crate::model::TypeGraph;

/// Source of resolved type/signature graphs (the language front end).
///
/// Providers own parsing and name binding; the analysis only ever sees the
/// graph they return.
pub trait GraphProvider: Send + Sync {
    fn resolve(&self, source: &Path) -> Result<TypeGraph, ResolutionError>;
    fn name(&self) -> &'static str;
    /// File extensions this provider claims when no provider is named.
    fn extensions(&self) -> &'static [&'static str];
}

fn read_source(source: &Path) -> Result<String, ResolutionError> {
    std::fs::read_to_string(source)
        .map_err(|e| ResolutionError::Io { path: source.to_path_buf(), source: e })
}

fn malformed(source: &Path, err: impl ToString) -> ResolutionError {
    ResolutionError::Malformed { path: source.to_path_buf(), message: err.to_string() }
}

/// Reads a graph document serialized as JSON.
pub struct JsonGraphProvider;

impl GraphProvider for JsonGraphProvider {
    fn resolve(&self, source: &Path) -> Result<TypeGraph, ResolutionError> {
        let text = read_source(source)?;
        serde_json::from_str(&text).map_err(|e| malformed(source, e))
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }
}

/// Reads a graph document serialized as YAML.
pub struct YamlGraphProvider;

impl GraphProvider for YamlGraphProvider {
    fn resolve(&self, source: &Path) -> Result<TypeGraph, ResolutionError> {
        let text = read_source(source)?;
        serde_yaml::from_str(&text).map_err(|e| malformed(source, e))
    }

    fn name(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }
}

/// Registry for graph providers; callers select by name or by file extension.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn GraphProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self { providers: HashMap::new() }
    }

    pub fn register<P: GraphProvider + 'static>(&mut self, provider: P) -> &mut Self {
        self.providers.insert(provider.name().to_string(), Box::new(provider));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn GraphProvider> {
        self.providers.get(name).map(|p| &**p)
    }

    /// Return a sorted list of registered provider names for error messages/help.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.providers.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Find the provider claiming `path`'s extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn GraphProvider> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.names()
            .iter()
            .filter_map(|name| self.get(name))
            .find(|p| p.extensions().contains(&ext.as_str()))
    }

    /// Pick the named provider, or fall back to the one matching `path`.
    pub fn select(
        &self,
        name: Option<&str>,
        path: &Path,
    ) -> Result<&dyn GraphProvider, ResolutionError> {
        let found = match name {
            Some(name) => self.get(name),
            None => self.for_path(path).or_else(|| self.get("json")),
        };
        found.ok_or_else(|| ResolutionError::UnknownProvider {
            name: name.unwrap_or("(by extension)").to_string(),
            available: self.names().join(", "),
        })
    }
}

/// Convenience builder for a registry populated with the built-in providers.
pub fn default_provider_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(JsonGraphProvider);
    registry.register(YamlGraphProvider);
    registry
}
