#![allow(dead_code)]
use orbit_shadergen::prelude::*;

/// transforms positions by a single matrix and passes the normal on
pub struct Mvp {
    pub position: Attribute,
    pub normal: Attribute,
    pub v_normal: Varying,
    pub mvp: Uniform<Mat4>,
    pub color: Uniform<Vec4>,
}

impl ShaderProgram for Mvp {
    fn vs_main(&self) -> Variable {
        self.v_normal.set(&self.normal);
        &self.mvp * &self.position
    }

    fn ps_main(&self) -> Variable {
        let normal = Vec4::compose([Variable::from(&self.v_normal), Variable::float(1.0)]);
        &self.color * normal
    }
}

pub fn mvp_shader() -> Shader<Mvp> {
    Shader::new(|| Mvp {
        position: Attribute::new(VertexComponent::Position),
        normal: Attribute::new(VertexComponent::Normal),
        v_normal: Varying::new(VertexComponent::Normal),
        mvp: Uniform::new(),
        color: Uniform::new(),
    })
}

/// a program defined by two closures over the declared value `T`
pub struct Stages<T, V, P> {
    pub values: T,
    pub vs: V,
    pub ps: P,
}

impl<T, V, P> ShaderProgram for Stages<T, V, P>
where
    V: Fn(&T) -> Variable,
    P: Fn(&T) -> Variable,
{
    fn vs_main(&self) -> Variable { (self.vs)(&self.values) }
    fn ps_main(&self) -> Variable { (self.ps)(&self.values) }
}

pub fn stages<T, V, P>(declare: impl FnOnce() -> T, vs: V, ps: P) -> Shader<Stages<T, V, P>>
where
    V: Fn(&T) -> Variable,
    P: Fn(&T) -> Variable,
{
    Shader::new(|| Stages {
        values: declare(),
        vs,
        ps,
    })
}

/// splits generated source at `#elif defined(FRAGMENT)` into the text
/// before (shared declarations and vertex stage) and after (fragment stage)
pub fn split_stages(code: &str) -> (&str, &str) {
    code.split_once("#elif defined(FRAGMENT)")
        .expect("generated code has a fragment section")
}

pub fn glsl<P: ShaderProgram>(shader: &Shader<P>) -> String {
    let generated = shader.generate(&GraphicsApi::OpenGL);
    assert_eq!(generated.language, Some(orbit_shadergen::Language::Glsl));
    generated.code
}

pub fn hlsl<P: ShaderProgram>(shader: &Shader<P>) -> String {
    let generated = shader.generate(&GraphicsApi::Direct3D11);
    assert_eq!(generated.language, Some(orbit_shadergen::Language::Hlsl));
    generated.code
}
