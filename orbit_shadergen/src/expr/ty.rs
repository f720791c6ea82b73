use std::fmt::Display;

use crate::Error;

/// the primitive element type of a scalar or vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Float,
    Int,
}

/// type tag of every [`Variable`](crate::Variable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    Float,
    FVec2,
    FVec3,
    FVec4,
    Mat4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    Array,
    /// samplers and values that were never assigned
    #[default]
    Unknown,
}

impl DataType {
    /// the scalar or vector type with `arity` components of kind `kind`.
    /// `None` if `arity` is not within `1..=4`
    pub const fn vector(kind: ScalarKind, arity: u8) -> Option<Self> {
        use DataType::*;
        Some(match (kind, arity) {
            (ScalarKind::Float, 1) => Float,
            (ScalarKind::Float, 2) => FVec2,
            (ScalarKind::Float, 3) => FVec3,
            (ScalarKind::Float, 4) => FVec4,
            (ScalarKind::Int, 1) => Int,
            (ScalarKind::Int, 2) => IVec2,
            (ScalarKind::Int, 3) => IVec3,
            (ScalarKind::Int, 4) => IVec4,
            _ => return None,
        })
    }

    /// amount of scalar components of scalars and vectors
    pub const fn arity(self) -> Option<u8> {
        use DataType::*;
        match self {
            Float | Int => Some(1),
            FVec2 | IVec2 => Some(2),
            FVec3 | IVec3 => Some(3),
            FVec4 | IVec4 => Some(4),
            Mat4 | Array | Unknown => None,
        }
    }

    pub const fn scalar_kind(self) -> Option<ScalarKind> {
        use DataType::*;
        match self {
            Float | FVec2 | FVec3 | FVec4 | Mat4 => Some(ScalarKind::Float),
            Int | IVec2 | IVec3 | IVec4 => Some(ScalarKind::Int),
            Array | Unknown => None,
        }
    }

    pub const fn is_scalar(self) -> bool { matches!(self, DataType::Float | DataType::Int) }

    /// vectors of 2 to 4 components
    pub const fn is_vector(self) -> bool { matches!(self.arity(), Some(2..=4)) }

    pub const fn is_float_vector(self) -> bool {
        matches!(self, DataType::FVec2 | DataType::FVec3 | DataType::FVec4)
    }

    pub const fn is_int_vector(self) -> bool {
        matches!(self, DataType::IVec2 | DataType::IVec3 | DataType::IVec4)
    }

    /// whether arithmetic operators can be applied to values of this type
    pub const fn is_numeric(self) -> bool { !matches!(self, DataType::Array | DataType::Unknown) }

    /// the type of `value[index]`
    pub fn element(self) -> Result<DataType, Error> {
        use DataType::*;
        match self {
            FVec2 | FVec3 | FVec4 => Ok(Float),
            IVec2 | IVec3 | IVec4 => Ok(Int),
            Mat4 => Ok(FVec4),
            x => Err(Error::NotIndexable(x)),
        }
    }

    /// the spelling used by the generated code of both languages.
    ///
    /// hlsl output `#define`s these onto its own type names.
    pub const fn canonical_name(self) -> &'static str {
        use DataType::*;
        match self {
            Float => "float",
            FVec2 => "vec2",
            FVec3 => "vec3",
            FVec4 => "vec4",
            Mat4 => "mat4",
            Int => "int",
            IVec2 => "ivec2",
            IVec3 => "ivec3",
            IVec4 => "ivec4",
            Array => "array",
            Unknown => "unknown",
        }
    }

    /// result type of `lhs * rhs`
    pub fn product(lhs: DataType, rhs: DataType) -> Result<DataType, Error> {
        use DataType::*;
        let err = || Error::InvalidOperands { op: "*", lhs, rhs };
        if !lhs.is_numeric() || !rhs.is_numeric() {
            return Err(err());
        }
        match (lhs, rhs) {
            (Mat4, FVec4) | (FVec4, Mat4) => Ok(FVec4),
            (Mat4, Float) | (Float, Mat4) => Ok(Mat4),
            (v, Float) | (Float, v) if v.is_float_vector() => Ok(v),
            (v, Int) | (Int, v) if v.is_int_vector() => Ok(v),
            (a, b) if a == b => Ok(a),
            _ => Err(err()),
        }
    }

    /// result type of `lhs / rhs`
    pub fn quotient(lhs: DataType, rhs: DataType) -> Result<DataType, Error> {
        use DataType::*;
        match (lhs, rhs) {
            (Float | FVec2 | FVec3 | FVec4, Float) => Ok(lhs),
            (Int, Int) => Ok(Int),
            _ => Err(Error::InvalidOperands { op: "/", lhs, rhs }),
        }
    }

    /// result type of `lhs + rhs` and `lhs - rhs`
    pub fn sum(op: &'static str, lhs: DataType, rhs: DataType) -> Result<DataType, Error> {
        match lhs == rhs && lhs.is_numeric() {
            true => Ok(lhs),
            false => Err(Error::InvalidOperands { op, lhs, rhs }),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.canonical_name()) }
}
