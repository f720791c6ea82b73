use crate::{DataType, ShaderKind};
use thiserror::*;

/// record-time defects of a shader description.
///
/// none of these are expected in a shipped program: they describe a shader
/// author using the expression algebra in a way the target languages cannot
/// express. Most operations therefore panic with the `Display` of one of
/// these variants, a few parsing/type functions return them as `Result`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("record-time type error: \n{}", .0)]
    TypeMismatch(String),
    #[error("operator `{op}` cannot be applied to operands of type `{lhs}` and `{rhs}`")]
    InvalidOperands {
        op: &'static str,
        lhs: DataType,
        rhs: DataType,
    },
    #[error("`{function}` cannot be called with an argument of type `{found}`")]
    InvalidArgument { function: &'static str, found: DataType },
    #[error("invalid swizzle `{name}`: {reason}")]
    Swizzle { name: String, reason: SwizzleError },
    #[error("a value of type `{}` cannot be indexed", .0)]
    NotIndexable(DataType),
    #[error("index {index} is out of bounds for an array of length {len}")]
    IndexOutOfBounds { index: i32, len: usize },
    #[error("trying to use {what} in a {stage} shader, where it is not available")]
    NotAvailableInStage { what: String, stage: ShaderKind },
    #[error("reading a variable that was never assigned a value")]
    Uninitialized,
    #[error("cannot record floating point number of category {:?}", .0)]
    UnsupportedFloatingPointCategory(std::num::FpCategory),
    #[error("{} was created outside of `Shader::new`, no shader is being declared on this thread", .0)]
    NoDeclarationScope(&'static str),
    #[error("cannot start declaring a shader, another shader is still being declared on this thread")]
    DeclarationScopeOccupied,
    #[error("cannot record `{}`, no shader stage is being emitted on this thread", .0)]
    NoEmissionSession(&'static str),
    #[error("cannot start emitting a shader stage, another stage is still being emitted on this thread")]
    EmissionSessionOccupied,
}

/// why a swizzle string was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwizzleError {
    #[error("a swizzle selects between 1 and 4 components, found {}", .0)]
    Length(usize),
    #[error("`{}` is not a component name, expected one of `xyzw` or `rgba`", .0)]
    UnknownComponent(char),
    #[error("the component sets `xyzw` and `rgba` cannot be mixed")]
    MixedSets,
    #[error("component `{}` is selected more than once, which is not allowed when assigning", .0)]
    DuplicateComponent(char),
    #[error("component `{component}` does not exist in a {arity} component vector")]
    OutOfRange { component: char, arity: u8 },
    #[error("values of type `{}` have no components to swizzle", .0)]
    NotAVector(DataType),
}

/// fail fast on a shader authoring defect
#[track_caller]
pub(crate) fn fail(error: Error) -> ! { panic!("{}", error) }

pub(crate) trait OrFail<T> {
    /// unwraps `Ok`, or fails fast with the contained [`Error`]
    fn or_fail(self) -> T;
}

impl<T> OrFail<T> for Result<T, Error> {
    #[track_caller]
    fn or_fail(self) -> T {
        match self {
            Ok(t) => t,
            Err(e) => fail(e),
        }
    }
}
