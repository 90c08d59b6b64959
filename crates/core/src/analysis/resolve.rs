use std::collections::HashMap;
use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Scalar, TypeDef, TypeGraph, TypeId, TypeRef, Unit};

/// The provider could not hand over a usable graph. Analysis of the run stops.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Failed to read type graph at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed type graph at {path}: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("Unknown provider: {name} (available: {available})")]
    UnknownProvider { name: String, available: String },
    #[error("Duplicate type definition: {0}")]
    DuplicateType(TypeId),
    #[error("Unknown type {id} referenced from {referrer}")]
    UnknownType { id: TypeId, referrer: String },
    #[error("Type {0} contains itself by value")]
    ByValueCycle(TypeId),
    #[error("Size of type {0} does not fit in 64 bits")]
    Overflow(TypeId),
    #[error("No units match pattern {0}")]
    NoMatchingUnits(String),
}

/// Dense index of a type definition inside a `ResolvedGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(pub usize);

/// A field lowered for layout: names are already bound to indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Scalar(Scalar),
    Pointer,
    Composite(TypeIndex),
}

/// A `TypeGraph` whose references all resolve and whose by-value nesting is
/// acyclic. Layout and scanning only ever run over this.
#[derive(Debug)]
pub struct ResolvedGraph<'g> {
    graph: &'g TypeGraph,
    defs: Vec<&'g TypeDef>,
    index: HashMap<&'g TypeId, TypeIndex>,
    slots: Vec<Vec<Slot>>,
    unit_ranges: Vec<Range<usize>>,
}

impl<'g> ResolvedGraph<'g> {
    pub fn resolve(graph: &'g TypeGraph) -> Result<Self, ResolutionError> {
        let mut defs = Vec::new();
        let mut index = HashMap::new();
        let mut unit_ranges = Vec::with_capacity(graph.units.len());

        for unit in &graph.units {
            let start = defs.len();
            for def in &unit.types {
                if index.insert(&def.id, TypeIndex(defs.len())).is_some() {
                    return Err(ResolutionError::DuplicateType(def.id.clone()));
                }
                defs.push(def);
            }
            unit_ranges.push(start..defs.len());
        }

        let mut slots = Vec::with_capacity(defs.len());
        for def in &defs {
            let lowered = def
                .fields
                .iter()
                .map(|field| {
                    lower(&index, &field.ty, || format!("field {}.{}", def.id, field.name))
                })
                .collect::<Result<Vec<_>, _>>()?;
            slots.push(lowered);
        }

        for unit in &graph.units {
            for sig in &unit.functions {
                for ty in sig.type_refs() {
                    check_bound(&index, ty, || {
                        format!("function {} at {}", sig.name, sig.position)
                    })?;
                }
            }
        }

        let resolved = Self { graph, defs, index, slots, unit_ranges };
        resolved.reject_cycles()?;
        Ok(resolved)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn def(&self, idx: TypeIndex) -> &'g TypeDef {
        self.defs[idx.0]
    }

    pub fn slots(&self, idx: TypeIndex) -> &[Slot] {
        &self.slots[idx.0]
    }

    pub fn index_of(&self, id: &TypeId) -> Option<TypeIndex> {
        self.index.get(id).copied()
    }

    /// Units paired with the indices of the types they define.
    pub fn units(&self) -> impl Iterator<Item = (&'g Unit, UnitTypes)> + '_ {
        self.graph.units.iter().zip(self.unit_ranges.iter().cloned().map(UnitTypes))
    }

    /// Depth-first walk over by-value nesting with an explicit stack; a type
    /// reached again while still open closes a cycle.
    fn reject_cycles(&self) -> Result<(), ResolutionError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.len()];
        for root in 0..self.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::InProgress;
            // (type, next slot to inspect)
            let mut stack = vec![(TypeIndex(root), 0usize)];

            while let Some(frame) = stack.last_mut() {
                let (idx, from) = *frame;
                let next_child =
                    self.slots(idx).iter().enumerate().skip(from).find_map(|(at, slot)| {
                        match slot {
                            Slot::Composite(child) => Some((at, *child)),
                            Slot::Scalar(_) | Slot::Pointer => None,
                        }
                    });

                match next_child {
                    Some((at, child)) => {
                        frame.1 = at + 1;
                        match marks[child.0] {
                            Mark::InProgress => {
                                return Err(ResolutionError::ByValueCycle(
                                    self.def(child).id.clone(),
                                ))
                            }
                            Mark::Done => {}
                            Mark::Unvisited => {
                                marks[child.0] = Mark::InProgress;
                                stack.push((child, 0));
                            }
                        }
                    }
                    None => {
                        marks[idx.0] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }
}

/// The type indices owned by one unit.
#[derive(Debug, Clone)]
pub struct UnitTypes(Range<usize>);

impl Iterator for UnitTypes {
    type Item = TypeIndex;

    fn next(&mut self) -> Option<TypeIndex> {
        self.0.next().map(TypeIndex)
    }
}

fn lower(
    index: &HashMap<&TypeId, TypeIndex>,
    ty: &TypeRef,
    referrer: impl Fn() -> String,
) -> Result<Slot, ResolutionError> {
    match ty {
        TypeRef::Primitive(scalar) => Ok(Slot::Scalar(*scalar)),
        TypeRef::Pointer(_) => {
            check_bound(index, ty, referrer)?;
            Ok(Slot::Pointer)
        }
        TypeRef::Named(id) => index
            .get(id)
            .copied()
            .map(Slot::Composite)
            .ok_or_else(|| ResolutionError::UnknownType { id: id.clone(), referrer: referrer() }),
    }
}

fn check_bound(
    index: &HashMap<&TypeId, TypeIndex>,
    ty: &TypeRef,
    referrer: impl Fn() -> String,
) -> Result<(), ResolutionError> {
    match ty.innermost_named() {
        Some(id) if !index.contains_key(id) => {
            Err(ResolutionError::UnknownType { id: id.clone(), referrer: referrer() })
        }
        _ => Ok(()),
    }
}
