//! a set of common imports, useful when writing shaders.
//!
//! intended to be used in files where shaders are defined like this:
//!
//! `use orbit_shadergen::prelude::*`
pub use crate::{Attribute, Sampler, Uniform, UniformArray, Varying};
pub use crate::{GraphicsApi, RenderContext, Settings};
pub use crate::{Shader, ShaderProgram, Variable, VertexComponent};

pub use crate::{Float, IVec2, IVec3, IVec4, Int, Mat4, Vec2, Vec3, Vec4};

pub use crate::{canonical_screen_pos, cos, dot, normalize, sample, sin, transpose};
