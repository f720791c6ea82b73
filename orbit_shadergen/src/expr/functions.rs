//! builtin functions, available in both stages
use std::rc::Rc;

use smallvec::smallvec;

use super::{Args, Binding, Builtin, DataType, Node, Variable};
use crate::{
    Sampler,
    error::{Error, fail},
};

#[track_caller]
fn call(f: Builtin, args: Args<2>, ty: DataType) -> Variable {
    debug_assert_eq!(args.len(), f.argc);
    Variable::from_node(Node::Builtin(f, args), ty)
}

#[track_caller]
fn expect(f: Builtin, x: &Variable, accept: impl Fn(DataType) -> bool) {
    if x.is_empty() {
        fail(Error::Uninitialized)
    }
    if !accept(x.data_type()) {
        fail(Error::InvalidArgument {
            function: f.name,
            found: x.data_type(),
        })
    }
}

fn float_or_float_vector(ty: DataType) -> bool { ty == DataType::Float || ty.is_float_vector() }

/// the transpose of a `mat4`
#[track_caller]
pub fn transpose(m: impl Into<Variable>) -> Variable {
    let m = m.into();
    expect(Builtin::Transpose, &m, |ty| ty == DataType::Mat4);
    call(Builtin::Transpose, smallvec![m.node().clone()], DataType::Mat4)
}

/// dot product of two float vectors of the same size
#[track_caller]
pub fn dot(a: impl Into<Variable>, b: impl Into<Variable>) -> Variable {
    let (a, b) = (a.into(), b.into());
    expect(Builtin::Dot, &a, DataType::is_float_vector);
    if a.data_type() != b.data_type() {
        fail(Error::InvalidOperands {
            op: "dot",
            lhs: a.data_type(),
            rhs: b.data_type(),
        })
    }
    call(Builtin::Dot, smallvec![a.node().clone(), b.node().clone()], DataType::Float)
}

#[track_caller]
pub fn normalize(v: impl Into<Variable>) -> Variable {
    let v = v.into();
    expect(Builtin::Normalize, &v, DataType::is_float_vector);
    let ty = v.data_type();
    call(Builtin::Normalize, smallvec![v.node().clone()], ty)
}

/// component wise cosine (radians)
#[track_caller]
pub fn cos(x: impl Into<Variable>) -> Variable {
    let x = x.into();
    expect(Builtin::Cos, &x, float_or_float_vector);
    let ty = x.data_type();
    call(Builtin::Cos, smallvec![x.node().clone()], ty)
}

/// component wise sine (radians)
#[track_caller]
pub fn sin(x: impl Into<Variable>) -> Variable {
    let x = x.into();
    expect(Builtin::Sin, &x, float_or_float_vector);
    let ty = x.data_type();
    call(Builtin::Sin, smallvec![x.node().clone()], ty)
}

/// samples the texture bound to `sampler` at the `vec2` texture coordinate `uv`
#[track_caller]
pub fn sample(sampler: &Sampler, uv: impl Into<Variable>) -> Variable {
    let uv = uv.into();
    expect(Builtin::Sample, &uv, |ty| ty == DataType::FVec2);
    let sampler = Node::Binding(Binding::Sampler(sampler.index()));
    call(
        Builtin::Sample,
        smallvec![Rc::new(sampler), uv.node().clone()],
        DataType::FVec4,
    )
}

/// converts a clip space position from the glsl depth convention
/// (`-w..w`) to the convention of the target api.
///
/// vertex shaders should return their position through this function if the
/// same projection matrices are used for every backend.
#[track_caller]
pub fn canonical_screen_pos(position: impl Into<Variable>) -> Variable {
    let p = position.into();
    expect(Builtin::CanonicalScreenPos, &p, |ty| ty == DataType::FVec4);
    call(Builtin::CanonicalScreenPos, smallvec![p.node().clone()], DataType::FVec4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Language, ShaderKind, Vec3};

    #[test]
    fn builtins_render_in_both_languages() {
        let n = normalize(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(n.data_type(), DataType::FVec3);
        for language in [Language::Glsl, Language::Hlsl] {
            assert_eq!(
                n.to_code(language, ShaderKind::Vertex),
                "normalize( vec3( 1.0, 2.0, 3.0 ) )"
            );
        }
        let d = dot(&n, &n);
        assert_eq!(d.data_type(), DataType::Float);
        assert_eq!(cos(d).data_type(), DataType::Float);
    }

    #[test]
    #[should_panic(expected = "`normalize` cannot be called with an argument of type `float`")]
    fn normalize_rejects_scalars() { normalize(1.0); }

    #[test]
    #[should_panic(expected = "operator `dot` cannot be applied")]
    fn dot_requires_same_size() { dot(Vec3::splat(1.0), crate::Vec2::splat(1.0)); }
}
