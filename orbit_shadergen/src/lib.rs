#![deny(rustdoc::broken_intra_doc_links)]

//! [`orbit_shadergen`](crate) - shader generation
//!
//! an embedded DSL for writing vertex/fragment shader pairs once in Rust and
//! generating GLSL or HLSL source for them, depending on the graphics api
//! of the render context.
//!
//! see `demos/print_shaders` for how to use it.

mod backend;
pub use backend::{GraphicsApi, Language, RenderContext, glsl_preamble};

mod context;
pub use context::ShaderKind;

mod error;
pub use error::{Error, SwizzleError};

mod expr;
pub use expr::*;

mod interface;
pub use interface::*;

mod layout;
pub use layout::*;

mod roles;
pub use roles::*;

mod settings;
pub use settings::Settings;

mod shader;
pub use shader::*;

pub mod prelude;
