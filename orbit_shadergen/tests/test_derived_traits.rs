#![allow(unused)]
use orbit_shadergen::{self as og, prelude::*};
use static_assertions::{assert_impl_all, assert_not_impl_any};

macro_rules! assert_impls {
    (
        $(
            impl
            $(($trait:path) for $($type: ty),*;)?
            $(!($ntrait:path) for $($ntype: ty),*;)?
        )+
    ) => {
        $(
            $($(assert_not_impl_any!($ntype: $ntrait);)?)*
            $($(assert_impl_all!($type: $trait);)?)*
        )*
    };
}

#[test]
fn recording_types_stay_on_their_thread() {
    // values refer to per-thread declaration and emission state
    assert_impls!(
        impl !(Send) for Variable, Attribute, Varying, Uniform<Mat4>, UniformArray<Vec4, 4>;
        impl !(Sync) for Variable, Attribute, Varying, Uniform<Mat4>;
        impl !(Send) for og::SwizzleMut<'static>;
        impl (Send) for og::GeneratedShader, Sampler, Settings;
    );
}

#[test]
fn value_types() {
    assert_impls!(
        impl (Clone  ) for Variable, og::GeneratedShader, og::VertexLayout, og::Interface;
        impl (Default) for Variable, Settings, og::VertexLayout;
        impl (Copy   ) for Settings, GraphicsApi, og::Language, VertexComponent, og::DataType, og::ShaderKind;
        impl !(Clone ) for Attribute, Varying, Uniform<Vec3>, Sampler;

        impl (RenderContext) for GraphicsApi, &GraphicsApi;
        impl (std::fmt::Display) for og::GeneratedShader, og::DataType, og::Swizzle, og::Error;
        impl (std::error::Error) for og::Error, og::SwizzleError;
        impl (og::UniformType) for Float, Vec2, Vec3, Vec4, Mat4;
        impl !(og::UniformType) for Int, IVec2, IVec3, IVec4;
    );
}

#[test]
fn interface_values_convert_into_variables() {
    assert_impls!(
        impl (Into<Variable>) for f64, i32, &Variable, &Attribute, &Varying, &Uniform<Mat4>;
        impl !(Into<Variable>) for f32, &Sampler, &UniformArray<Mat4, 2>;
    );
}

#[test]
fn interface_values_take_part_in_arithmetic() {
    assert_impls!(
        impl (std::ops::Mul<&'static Attribute>) for &'static Uniform<Mat4>, &'static Uniform<Float>, &'static Varying;
        impl (std::ops::Add<Variable>) for &'static Uniform<Vec4>, &'static Attribute;
        impl (std::ops::Neg) for &'static Uniform<Vec2>, &'static Varying;
    );
}
