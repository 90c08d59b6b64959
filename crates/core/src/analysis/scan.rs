use serde::Serialize;

use crate::analysis::classify::WideSet;
use crate::model::{FunctionSignature, TypeRef, Unit};

/// A function signature that copies at least one wide struct by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopySite<'g> {
    /// Path of the unit the function belongs to.
    pub unit: &'g str,
    pub function: &'g FunctionSignature,
    /// One entry per offending position: receiver, then parameters, then results.
    pub should_be: Vec<String>,
}

impl CopySite<'_> {
    pub fn identity(&self) -> String {
        self.function.identity(self.unit)
    }
}

fn copies_wide(ty: &TypeRef, wide: &WideSet<'_>) -> bool {
    ty.by_value_named().is_some_and(|id| wide.contains(id))
}

/// Describe the positions of `sig` that take or return a wide struct by value.
pub fn offending_positions(sig: &FunctionSignature, wide: &WideSet<'_>) -> Vec<String> {
    let mut should_be = Vec::new();

    if sig.receiver.as_ref().is_some_and(|recv| copies_wide(recv, wide)) {
        should_be.push("receiver".to_string());
    }

    for (i, param) in sig.params.iter().enumerate() {
        if copies_wide(&param.ty, wide) {
            let label = match &param.name {
                Some(name) if !name.is_empty() => format!("parameter '{name}'"),
                _ => "parameter".to_string(),
            };
            should_be.push(format!("{label} at index {i}"));
        }
    }

    for (i, result) in sig.results.iter().enumerate() {
        if copies_wide(&result.ty, wide) {
            should_be.push(format!("return value '{}' at index {i}", result.ty));
        }
    }

    should_be
}

/// Scan every function of `unit` against the unit's wide set.
pub fn scan<'g>(unit: &'g Unit, wide: &WideSet<'_>) -> Vec<CopySite<'g>> {
    unit.functions
        .iter()
        .filter_map(|function| {
            let should_be = offending_positions(function, wide);
            (!should_be.is_empty()).then_some(CopySite {
                unit: unit.path.as_str(),
                function,
                should_be,
            })
        })
        .collect()
}
