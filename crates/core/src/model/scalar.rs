use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Builtin scalar kinds a provider can name directly.
///
/// Platform-dependent kinds (`int`, `string`, `slice`, ...) are measured in
/// machine words and scale with the configured word size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Int,
    Uint,
    Uintptr,
    UnsafePointer,
    Map,
    Chan,
    Func,
    String,
    Interface,
    Slice,
}

/// Size class of a builtin before the alignment cap is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Fixed byte size and alignment.
    Bytes { size: u64, align: u64 },
    /// A multiple of the word size, word aligned.
    Words(u64),
}

impl Builtin {
    pub fn width(self) -> Width {
        use Builtin::*;
        match self {
            Bool | Int8 | Uint8 => Width::Bytes { size: 1, align: 1 },
            Int16 | Uint16 => Width::Bytes { size: 2, align: 2 },
            Int32 | Uint32 | Float32 => Width::Bytes { size: 4, align: 4 },
            Int64 | Uint64 | Float64 => Width::Bytes { size: 8, align: 8 },
            // Complex numbers align to their component type.
            Complex64 => Width::Bytes { size: 8, align: 4 },
            Complex128 => Width::Bytes { size: 16, align: 8 },
            Int | Uint | Uintptr | UnsafePointer | Map | Chan | Func => Width::Words(1),
            String | Interface => Width::Words(2),
            Slice => Width::Words(3),
        }
    }

    pub fn name(self) -> &'static str {
        use Builtin::*;
        match self {
            Bool => "bool",
            Int8 => "int8",
            Uint8 => "uint8",
            Int16 => "int16",
            Uint16 => "uint16",
            Int32 => "int32",
            Uint32 => "uint32",
            Int64 => "int64",
            Uint64 => "uint64",
            Float32 => "float32",
            Float64 => "float64",
            Complex64 => "complex64",
            Complex128 => "complex128",
            Int => "int",
            Uint => "uint",
            Uintptr => "uintptr",
            UnsafePointer => "unsafe.Pointer",
            Map => "map",
            Chan => "chan",
            Func => "func",
            String => "string",
            Interface => "interface",
            Slice => "slice",
        }
    }
}

impl FromStr for Builtin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Builtin::*;
        let builtin = match s {
            "bool" => Bool,
            "int8" => Int8,
            "uint8" | "byte" => Uint8,
            "int16" => Int16,
            "uint16" => Uint16,
            "int32" | "rune" => Int32,
            "uint32" => Uint32,
            "int64" => Int64,
            "uint64" => Uint64,
            "float32" => Float32,
            "float64" => Float64,
            "complex64" => Complex64,
            "complex128" => Complex128,
            "int" => Int,
            "uint" => Uint,
            "uintptr" => Uintptr,
            "unsafe.Pointer" => UnsafePointer,
            "map" => Map,
            "chan" => Chan,
            "func" => Func,
            "string" => String,
            "interface" => Interface,
            "slice" => Slice,
            other => return Err(format!("unknown builtin type '{other}'")),
        };
        Ok(builtin)
    }
}

/// A primitive field type: a named builtin or a provider-computed opaque
/// blob (fixed arrays, foreign types, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr", into = "ScalarRepr")]
pub enum Scalar {
    Builtin(Builtin),
    Opaque { size: u64, align: u64 },
}

impl Scalar {
    pub fn width(self) -> Width {
        match self {
            Scalar::Builtin(builtin) => builtin.width(),
            Scalar::Opaque { size, align } => Width::Bytes { size, align: align.max(1) },
        }
    }
}

impl From<Builtin> for Scalar {
    fn from(builtin: Builtin) -> Self {
        Scalar::Builtin(builtin)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Builtin(builtin) => f.write_str(builtin.name()),
            Scalar::Opaque { size, align } => write!(f, "opaque(size={size}, align={align})"),
        }
    }
}

/// On-disk form: either a builtin name or `{ "size": .., "align": .. }`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Name(String),
    Opaque { size: u64, align: u64 },
}

impl TryFrom<ScalarRepr> for Scalar {
    type Error = String;

    fn try_from(repr: ScalarRepr) -> Result<Self, Self::Error> {
        match repr {
            ScalarRepr::Name(name) => name.parse().map(Scalar::Builtin),
            ScalarRepr::Opaque { size, align } => Ok(Scalar::Opaque { size, align }),
        }
    }
}

impl From<Scalar> for ScalarRepr {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Builtin(builtin) => ScalarRepr::Name(builtin.name().to_string()),
            Scalar::Opaque { size, align } => ScalarRepr::Opaque { size, align },
        }
    }
}
