//! Resolved type/signature graph as handed over by a resolution provider.
//!
//! Everything here is plain immutable data:
//! - `TypeDef`s describe named composites and their ordered fields
//! - `FunctionSignature`s carry receiver, parameters, results and a position
//! - `Unit`s group both per package
//!
//! Nothing in this module validates references; see `analysis::resolve`.

use std::fmt;

use serde::{Deserialize, Serialize};

mod scalar;

pub use scalar::{Builtin, Scalar, Width};

/// Stable identity of a named composite, unique across the whole graph
/// (typically package-qualified, e.g. `shapes.Big`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub String);

impl TypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to a type from a field or a signature position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(Scalar),
    /// A named composite, used by value.
    Named(TypeId),
    /// Pointer (or any other indirection) to the inner type.
    Pointer(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(id: impl Into<String>) -> Self {
        TypeRef::Named(TypeId::new(id))
    }

    pub fn pointer_to(inner: TypeRef) -> Self {
        TypeRef::Pointer(Box::new(inner))
    }

    pub fn builtin(builtin: Builtin) -> Self {
        TypeRef::Primitive(Scalar::Builtin(builtin))
    }

    /// The named composite this reference copies by value, if any.
    pub fn by_value_named(&self) -> Option<&TypeId> {
        match self {
            TypeRef::Named(id) => Some(id),
            TypeRef::Primitive(_) | TypeRef::Pointer(_) => None,
        }
    }

    /// The named composite at the bottom of any pointer chain, if any.
    pub fn innermost_named(&self) -> Option<&TypeId> {
        match self {
            TypeRef::Named(id) => Some(id),
            TypeRef::Pointer(inner) => inner.innermost_named(),
            TypeRef::Primitive(_) => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(scalar) => scalar.fmt(f),
            TypeRef::Named(id) => id.fmt(f),
            TypeRef::Pointer(inner) => write!(f, "*{inner}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }
}

/// A named composite (struct-like) type. Field order is layout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub id: TypeId,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl TypeDef {
    pub fn new(id: impl Into<String>, fields: Vec<Field>) -> Self {
        Self { id: TypeId::new(id), fields }
    }
}

/// Declaration position of a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self { file: file.into(), line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A parameter or result slot. Names are optional (`_` and unnamed results).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: Some(name.into()), ty }
    }

    pub fn unnamed(ty: TypeRef) -> Self {
        Self { name: None, ty }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<TypeRef>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Param>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            receiver: None,
            params: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn with_receiver(mut self, receiver: TypeRef) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_result(mut self, result: Param) -> Self {
        self.results.push(result);
        self
    }

    /// Every type reference in the signature, receiver first.
    pub fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
        self.receiver
            .iter()
            .chain(self.params.iter().map(|p| &p.ty))
            .chain(self.results.iter().map(|r| &r.ty))
    }

    /// Human-readable identity, e.g. `func (shapes.Bigger).M(x shapes.Big) shapes.Bigger`.
    ///
    /// Free functions are qualified with the unit path they live in.
    pub fn identity(&self, unit: &str) -> String {
        let mut out = String::from("func ");
        match &self.receiver {
            Some(recv) => out.push_str(&format!("({recv}).")),
            None if !unit.is_empty() => out.push_str(&format!("{unit}.")),
            None => {}
        }
        out.push_str(&self.name);
        out.push('(');
        out.push_str(&join_params(&self.params));
        out.push(')');

        match self.results.as_slice() {
            [] => {}
            [Param { name: None, ty }] => out.push_str(&format!(" {ty}")),
            results => out.push_str(&format!(" ({})", join_params(results))),
        }
        out
    }
}

fn join_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| match &p.name {
            Some(name) => format!("{name} {}", p.ty),
            None => p.ty.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One analysis unit (a package): its own type definitions and functions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Unit {
    pub path: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub functions: Vec<FunctionSignature>,
}

impl Unit {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.types.push(def);
        self
    }

    pub fn with_function(mut self, sig: FunctionSignature) -> Self {
        self.functions.push(sig);
        self
    }
}

/// The complete resolved graph a provider produces for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeGraph {
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl TypeGraph {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }
}
