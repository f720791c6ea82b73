use std::fmt::Display;

use crate::{
    Interface, Language, RenderContext, Settings, Variable, VertexLayout,
    backend::{glsl, hlsl},
    context::declaration::DeclarationGuard,
    error::OrFail,
};

/// the two entry points of a shader program.
///
/// implementors hold their interface values ([`Attribute`](crate::Attribute),
/// [`Varying`](crate::Varying), [`Uniform`](crate::Uniform), ...) as fields
/// and are constructed through [`Shader::new`].
pub trait ShaderProgram {
    /// records the vertex stage. Returns the clip space position (`vec4`).
    fn vs_main(&self) -> Variable;
    /// records the fragment stage. Returns the output color (`vec4`).
    fn ps_main(&self) -> Variable;
}

/// a shader program together with everything it declared.
///
/// ```ignore
/// struct Unlit {
///     position: Attribute,
///     mvp: Uniform<Mat4>,
///     color: Uniform<Vec4>,
/// }
///
/// impl ShaderProgram for Unlit {
///     fn vs_main(&self) -> Variable { &self.mvp * &self.position }
///     fn ps_main(&self) -> Variable { self.color.clone() }
/// }
///
/// let shader = Shader::new(|| Unlit {
///     position: Attribute::new(VertexComponent::Position),
///     mvp: Uniform::new(),
///     color: Uniform::new(),
/// });
/// let source = shader.generate(&GraphicsApi::OpenGL);
/// ```
#[derive(Debug)]
pub struct Shader<P> {
    program: P,
    interface: Interface,
}

impl<P> Shader<P> {
    /// runs `declare` in a fresh declaration scope. Interface values created
    /// within it register into this shader, in the order they are created.
    ///
    /// panics if called while another shader is being declared on this thread.
    #[track_caller]
    pub fn new(declare: impl FnOnce() -> P) -> Self {
        let guard = DeclarationGuard::open().or_fail();
        let program = declare();
        let interface = guard.finish();
        tracing::debug!(
            attributes = interface.attributes().len(),
            varyings = interface.varyings().len(),
            uniforms = interface.uniforms().len(),
            samplers = interface.sampler_count(),
            "declared shader"
        );
        Self { program, interface }
    }

    pub fn program(&self) -> &P { &self.program }

    pub fn interface(&self) -> &Interface { &self.interface }

    /// the attribute layout vertex buffers drawn with this shader must have
    pub fn vertex_layout(&self) -> &VertexLayout { self.interface.attributes() }

    pub fn varying_layout(&self) -> &VertexLayout { self.interface.varyings() }
}

impl<P: ShaderProgram> Shader<P> {
    /// generates the source for the backend of `ctx` with default [`Settings`]
    #[track_caller]
    pub fn generate(&self, ctx: &impl RenderContext) -> GeneratedShader { self.generate_with(ctx, &Settings::default()) }

    /// generates the source for the backend of `ctx`.
    ///
    /// backends without an emitter produce empty code and a warning.
    #[track_caller]
    pub fn generate_with(&self, ctx: &impl RenderContext, settings: &Settings) -> GeneratedShader {
        let api = ctx.graphics_api();
        let language = Language::for_api(api);
        let code = match language {
            Some(language) => self.generate_source(language, settings),
            None => {
                tracing::warn!(%api, "no shader emitter for this graphics api, generating empty source");
                String::new()
            }
        };
        GeneratedShader {
            language,
            code,
            vertex_layout: self.vertex_layout().clone(),
            varying_layout: self.varying_layout().clone(),
        }
    }

    /// the complete source of both stages in `language`.
    ///
    /// runs [`ShaderProgram::vs_main`] and [`ShaderProgram::ps_main`] once
    /// each. The output only depends on the program, so repeated calls
    /// produce identical text.
    #[track_caller]
    pub fn generate_source(&self, language: Language, settings: &Settings) -> String {
        let result = match language {
            Language::Glsl => glsl::emit(&self.program, &self.interface, settings),
            Language::Hlsl => hlsl::emit(&self.program, &self.interface, settings),
        };
        match result {
            Ok(code) => code,
            Err(std::fmt::Error) => unreachable!("writing into a `String` cannot fail"),
        }
    }
}

/// the output of [`Shader::generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedShader {
    /// `None` if the graphics api has no emitter, `code` is empty then
    pub language: Option<Language>,
    pub code: String,
    pub vertex_layout: VertexLayout,
    pub varying_layout: VertexLayout,
}

impl GeneratedShader {
    pub fn is_empty(&self) -> bool { self.code.is_empty() }
}

impl Display for GeneratedShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.code) }
}
