//! the shader types as Rust items: markers for declaring uniforms
//! (`Uniform<Mat4>`) and constructor functions (`Vec4::new(..)`).
use smallvec::SmallVec;

use super::{DataType, Node, Variable};
use crate::error::{Error, fail};

/// a type that a [`Uniform`](crate::Uniform) can hold
pub trait UniformType {
    const DATA_TYPE: DataType;
}

macro_rules! shader_types {
    ($($(#[$attr: meta])* $Ty: ident => $data_type: ident $(($($arg: ident),+))?;)*) => {$(
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $Ty {}

        $(
        impl $Ty {
            /// constructs a value from one scalar per component,
            /// e.g. `Vec4::new(0.0, 0.0, 0.0, 1.0)`.
            #[allow(clippy::new_ret_no_self)]
            #[track_caller]
            pub fn new($($arg: impl Into<Variable>),+) -> Variable {
                compose(DataType::$data_type, [$($arg.into()),+])
            }

            /// constructs a value from scalars and vectors whose components
            /// add up to the size of the type, e.g. `Vec4::compose([xyz, Variable::float(1.0)])`.
            #[track_caller]
            pub fn compose(parts: impl IntoIterator<Item = Variable>) -> Variable {
                compose(DataType::$data_type, parts)
            }

            /// every component set to the scalar `x`
            #[track_caller]
            pub fn splat(x: impl Into<Variable>) -> Variable { splat(DataType::$data_type, x.into()) }
        }
        )?
    )*};
}

macro_rules! uniform_types {
    ($($Ty: ident => $data_type: ident;)*) => {$(
        impl UniformType for $Ty {
            const DATA_TYPE: DataType = DataType::$data_type;
        }
    )*};
}

shader_types! {
    /// `float`
    Float => Float (x);
    /// `vec2`
    Vec2 => FVec2 (x, y);
    /// `vec3`
    Vec3 => FVec3 (x, y, z);
    /// `vec4`
    Vec4 => FVec4 (x, y, z, w);
    /// `mat4`, only available as uniform
    Mat4 => Mat4;
    /// `int`
    Int => Int (x);
    IVec2 => IVec2 (x, y);
    IVec3 => IVec3 (x, y, z);
    IVec4 => IVec4 (x, y, z, w);
}

uniform_types! {
    Float => Float;
    Vec2 => FVec2;
    Vec3 => FVec3;
    Vec4 => FVec4;
    Mat4 => Mat4;
}

/// `ty( parts... )`. A single part that already has type `ty` is returned as is.
#[track_caller]
fn compose(ty: DataType, parts: impl IntoIterator<Item = Variable>) -> Variable {
    let parts: SmallVec<[Variable; 4]> = parts.into_iter().collect();
    let Some(arity) = ty.arity() else {
        unreachable!("constructor of non vector type `{ty}`")
    };

    let mut count = 0;
    for part in &parts {
        if part.is_empty() {
            fail(Error::Uninitialized)
        }
        match part.data_type().arity() {
            Some(n) => count += n,
            None => fail(Error::InvalidArgument {
                function: ty.canonical_name(),
                found: part.data_type(),
            }),
        }
    }
    if count != arity {
        fail(Error::TypeMismatch(format!(
            "`{ty}` has {arity} components, but was constructed from {count}"
        )))
    }

    if let [single] = parts.as_slice() {
        if single.data_type() == ty {
            return single.clone();
        }
    }
    let args = parts.iter().map(|p| p.node().clone()).collect();
    Variable::from_node(Node::Construct(ty, args), ty)
}

/// `ty( x, x, ... )` with one argument per component
#[track_caller]
fn splat(ty: DataType, x: Variable) -> Variable {
    if !x.data_type().is_scalar() {
        fail(Error::InvalidArgument {
            function: ty.canonical_name(),
            found: x.data_type(),
        })
    }
    let arity = ty.arity().unwrap_or(1) as usize;
    compose(ty, std::iter::repeat_n(x, arity))
}
