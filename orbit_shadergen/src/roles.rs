//! interface values of a shader. Each of these registers itself into the
//! shader that is being declared when it is constructed, so they can only
//! be created within the closure passed to [`Shader::new`](crate::Shader::new).
use std::{marker::PhantomData, ops::Deref};

use crate::{
    Binding, DataType, ShaderKind, SwizzleMut, UniformType, Variable, VertexComponent,
    context::{declaration::with_declaration, session::with_session},
    error::{Error, OrFail, fail},
    expr::{
        AssignOp, Literal, Node,
        variable::{check_assignment, forward_operators, record_assignment, subscript},
    },
};

macro_rules! as_variable {
    ($(@[$($gen: tt)*])? $ty: ty) => {
        impl<$($($gen)*)?> Deref for $ty {
            type Target = Variable;
            fn deref(&self) -> &Variable { &self.var }
        }

        impl<$($($gen)*)?> From<&$ty> for Variable {
            fn from(x: &$ty) -> Variable { x.var.clone() }
        }

        forward_operators!($(@[$($gen)*])? $ty);
    };
}

/// per-vertex input of the vertex stage, read-only.
///
/// reading it in the fragment stage is an error, pass values on through a [`Varying`].
#[derive(Debug)]
pub struct Attribute {
    var: Variable,
    component: VertexComponent,
}

impl Attribute {
    /// appends `component` to the shader's vertex layout
    #[track_caller]
    pub fn new(component: VertexComponent) -> Self {
        let index = with_declaration("Attribute::new", |i| i.add_attribute(component));
        Self {
            var: Variable::bound(Binding::Attribute(index), component.data_type()),
            component,
        }
    }

    pub fn component(&self) -> VertexComponent { self.component }
}

as_variable!(Attribute);

/// a value written by the vertex stage and read, interpolated, by the fragment stage
#[derive(Debug)]
pub struct Varying {
    var: Variable,
    component: VertexComponent,
}

impl Varying {
    /// appends `component` to the shader's varying layout
    #[track_caller]
    pub fn new(component: VertexComponent) -> Self {
        let index = with_declaration("Varying::new", |i| i.add_varying(component));
        Self {
            var: Variable::bound(Binding::Varying(index), component.data_type()),
            component,
        }
    }

    pub fn component(&self) -> VertexComponent { self.component }

    #[track_caller]
    fn assert_writable(&self, what: &'static str) {
        let kind = with_session(what, |s| s.target().kind);
        if kind != ShaderKind::Vertex {
            fail(Error::NotAvailableInStage {
                what: format!("writing to varying `{}`", self.component),
                stage: kind,
            })
        }
    }

    /// `varying = rhs;`, only in the vertex stage
    #[track_caller]
    pub fn set(&self, rhs: impl Into<Variable>) {
        self.assert_writable("Varying::set");
        let rhs = rhs.into();
        check_assignment(self.var.data_type(), AssignOp::Assign, &rhs).or_fail();
        record_assignment(&self.var, AssignOp::Assign, &rhs);
    }

    /// writes part of the varying: `normal.swizzle_mut("xy").set(v)`.
    /// Only in the vertex stage.
    #[track_caller]
    pub fn swizzle_mut(&self, name: &str) -> SwizzleMut<'_> {
        self.assert_writable("Varying::swizzle_mut");
        let sw = crate::Swizzle::parse_writable(name).or_fail();
        let ty = sw.result_type(self.var.data_type()).or_fail();
        SwizzleMut::new(&self.var, sw, ty)
    }
}

as_variable!(Varying);

/// a constant of type `T` shared by all invocations of a draw.
///
/// it is declared in the constant block of every stage that reads it.
#[derive(Debug)]
pub struct Uniform<T: UniformType> {
    var: Variable,
    phantom: PhantomData<T>,
}

impl<T: UniformType> Uniform<T> {
    #[allow(clippy::new_without_default)]
    #[track_caller]
    pub fn new() -> Self {
        let index = with_declaration("Uniform::new", |i| i.add_uniform(T::DATA_TYPE, None));
        Self {
            var: Variable::bound(Binding::Uniform(index), T::DATA_TYPE),
            phantom: PhantomData,
        }
    }
}

as_variable!(@[T: UniformType] Uniform<T>);

/// a uniform array of `N` elements of type `T`, e.g. joint matrices
#[derive(Debug)]
pub struct UniformArray<T: UniformType, const N: usize> {
    var: Variable,
    phantom: PhantomData<T>,
}

impl<T: UniformType, const N: usize> UniformArray<T, N> {
    #[allow(clippy::new_without_default)]
    #[track_caller]
    pub fn new() -> Self {
        let index = with_declaration("UniformArray::new", |i| i.add_uniform(T::DATA_TYPE, Some(N)));
        Self {
            var: Variable::bound(Binding::Uniform(index), DataType::Array),
            phantom: PhantomData,
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize { N }

    /// `array[ index ]` with an `int` index.
    /// literal indices are bounds checked.
    #[track_caller]
    pub fn at(&self, index: impl Into<Variable>) -> Variable {
        let index = index.into();
        if let Node::Literal(Literal::Int(i)) = **index.node() {
            if !(0..N as i64).contains(&(i as i64)) {
                fail(Error::IndexOutOfBounds { index: i, len: N })
            }
        }
        subscript(&self.var, index, T::DATA_TYPE)
    }
}

impl<T: UniformType, const N: usize> Deref for UniformArray<T, N> {
    type Target = Variable;
    fn deref(&self) -> &Variable { &self.var }
}

/// a 2d texture together with the sampler that reads it
#[derive(Debug)]
pub struct Sampler {
    index: u32,
}

impl Sampler {
    #[allow(clippy::new_without_default)]
    #[track_caller]
    pub fn new() -> Self {
        let index = with_declaration("Sampler::new", |i| i.add_sampler());
        Self { index }
    }

    pub fn index(&self) -> u32 { self.index }

    /// the texel at texture coordinate `uv`, see [`sample`](crate::sample)
    #[track_caller]
    pub fn sample(&self, uv: impl Into<Variable>) -> Variable { crate::sample(self, uv) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Language, Mat4, Vec4, context::declaration::DeclarationGuard};

    #[test]
    fn roles_register_in_order() {
        let guard = DeclarationGuard::open().unwrap();
        let pos = Attribute::new(VertexComponent::Position);
        let mvp = Uniform::<Mat4>::new();
        let normal = Varying::new(VertexComponent::Normal);
        let joints = UniformArray::<Vec4, 16>::new();
        let sampler = Sampler::new();
        let interface = guard.finish();

        assert_eq!(pos.to_code(Language::Glsl, ShaderKind::Vertex), "attribute_0");
        assert_eq!(pos.component(), VertexComponent::Position);
        assert_eq!(mvp.data_type(), DataType::Mat4);
        assert_eq!(normal.data_type(), DataType::FVec3);
        assert_eq!(joints.data_type(), DataType::Array);
        assert_eq!(sampler.index(), 0);

        assert_eq!(interface.uniforms().len(), 2);
        assert_eq!(interface.uniforms()[1].array_len, Some(16));
        assert_eq!(interface.uniforms()[1].data_type, DataType::FVec4);
        assert_eq!(interface.sampler_count(), 1);
    }

    #[test]
    #[should_panic(expected = "was created outside of `Shader::new`")]
    fn roles_require_a_declaration() { Uniform::<Mat4>::new(); }

    #[test]
    #[should_panic(expected = "index 16 is out of bounds for an array of length 16")]
    fn literal_indices_are_checked() {
        let guard = DeclarationGuard::open().unwrap();
        let joints = UniformArray::<Vec4, 16>::new();
        drop(guard);
        joints.at(16);
    }
}
