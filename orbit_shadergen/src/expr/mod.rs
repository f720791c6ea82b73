//! the expression algebra shader authors write in
pub(crate) mod constructors;
pub(crate) mod functions;
pub(crate) mod node;
mod swizzle;
mod ty;
pub(crate) mod variable;

pub use constructors::*;
pub use functions::*;
pub use node::Binding;
pub(crate) use node::{Args, AssignOp, Builtin, Literal, Node, Operator};
pub use swizzle::*;
pub use ty::*;
pub use variable::{SwizzleMut, Variable};
