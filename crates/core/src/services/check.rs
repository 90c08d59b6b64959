use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{classify, scan, ResolutionError, ResolvedGraph, SizeModel};
use crate::config::{ConfigError, SizeConfig};
use crate::model::{TypeGraph, TypeId, Unit};
use crate::report::{self, Diagnostic};
use crate::services::providers::GraphProvider;
use crate::services::units::UnitPattern;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid size configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Outcome of one checking pass over a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub units_checked: usize,
    /// Sorted by file, line, column.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn has_findings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Size-model row for one type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSize {
    pub unit: String,
    pub id: TypeId,
    pub size: u64,
    pub align: u64,
    pub wide: bool,
}

/// Runs the size model, classifier, scanner and reporter over resolved graphs.
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    pub config: &'a SizeConfig,
    /// Restrict the pass to matching units; all units when `None`.
    pub units: Option<&'a UnitPattern>,
}

impl<'a> Checker<'a> {
    pub fn new(config: &'a SizeConfig) -> Self {
        Self { config, units: None }
    }

    pub fn with_units(mut self, pattern: Option<&'a UnitPattern>) -> Self {
        self.units = pattern;
        self
    }

    /// Resolve `source` through `provider`, then check it.
    pub fn check_source(
        &self,
        provider: &dyn GraphProvider,
        source: &Path,
    ) -> Result<CheckReport, CheckError> {
        let graph = self.load(provider, source)?;
        self.check(&graph)
    }

    /// Resolve `source` through `provider`, then lay out its types.
    pub fn sizes_source(
        &self,
        provider: &dyn GraphProvider,
        source: &Path,
    ) -> Result<Vec<TypeSize>, CheckError> {
        let graph = self.load(provider, source)?;
        self.sizes(&graph)
    }

    /// Configuration is rejected before the provider is asked for anything.
    fn load(&self, provider: &dyn GraphProvider, source: &Path) -> Result<TypeGraph, CheckError> {
        self.config.validate()?;
        tracing::debug!(provider = provider.name(), source = %source.display(), "resolving graph");
        Ok(provider.resolve(source)?)
    }

    pub fn check(&self, graph: &TypeGraph) -> Result<CheckReport, CheckError> {
        self.config.validate()?;
        let resolved = ResolvedGraph::resolve(graph)?;
        let mut model = SizeModel::new(&resolved, self.config);

        let mut sites = Vec::new();
        let mut units_checked = 0;
        for (unit, types) in resolved.units() {
            if !self.selects(unit) {
                continue;
            }
            let _span = tracing::debug_span!("unit", path = %unit.path).entered();
            units_checked += 1;

            let wide = classify(types, &mut model)?;
            let found = scan(unit, &wide);
            tracing::debug!(wide = wide.len(), sites = found.len(), "checked unit");
            sites.extend(found);
        }
        self.require_match(units_checked)?;

        Ok(CheckReport { units_checked, diagnostics: report::diagnostics(sites) })
    }

    /// Footprint of every type defined in the selected units, in document order.
    pub fn sizes(&self, graph: &TypeGraph) -> Result<Vec<TypeSize>, CheckError> {
        self.config.validate()?;
        let resolved = ResolvedGraph::resolve(graph)?;
        let mut model = SizeModel::new(&resolved, self.config);

        let mut rows = Vec::new();
        let mut units_checked = 0;
        for (unit, types) in resolved.units() {
            if !self.selects(unit) {
                continue;
            }
            units_checked += 1;
            for idx in types {
                let layout = model.layout(idx)?;
                rows.push(TypeSize {
                    unit: unit.path.clone(),
                    id: resolved.def(idx).id.clone(),
                    size: layout.size,
                    align: layout.align,
                    wide: crate::analysis::is_wide(layout.size, self.config.max_width),
                });
            }
        }
        self.require_match(units_checked)?;
        Ok(rows)
    }

    fn selects(&self, unit: &Unit) -> bool {
        self.units.map_or(true, |pattern| pattern.matches(&unit.path))
    }

    fn require_match(&self, units_checked: usize) -> Result<(), ResolutionError> {
        match self.units {
            Some(pattern) if units_checked == 0 => {
                Err(ResolutionError::NoMatchingUnits(pattern.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Check a whole graph with `config` and no unit filter.
pub fn check_graph(graph: &TypeGraph, config: &SizeConfig) -> Result<CheckReport, CheckError> {
    Checker::new(config).check(graph)
}
