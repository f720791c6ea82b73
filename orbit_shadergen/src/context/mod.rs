//! the two pieces of per-thread state a shader description is recorded into:
//! the declaration scope (open while a [`Shader`](crate::Shader) constructs
//! its interface values) and the emission session (open while one shader
//! stage is turned into code).
use std::fmt::Display;

pub(crate) mod declaration;
pub(crate) mod session;

/// `*const ()` is neither `Send` nor `Sync`
pub(crate) type Unsend = std::marker::PhantomData<*const ()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl Display for ShaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        })
    }
}
