/// the language that the generated shaders should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    /// the OpenGL Shading Language.
    ///
    /// the output relies on a small macro vocabulary (`ORB_ATTRIBUTE`,
    /// `ORB_VARYING`, ...) being defined before it is compiled, see
    /// [`glsl_preamble`](crate::glsl_preamble).
    Glsl,
    /// the High-Level Shading Language of Direct3D
    Hlsl,
}

impl Language {
    /// the language the emitter writes for `api`, `None` if there is no emitter for it
    pub const fn for_api(api: GraphicsApi) -> Option<Language> {
        match api {
            GraphicsApi::OpenGL => Some(Language::Glsl),
            GraphicsApi::Direct3D11 => Some(Language::Hlsl),
            GraphicsApi::Vulkan | GraphicsApi::Metal => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Glsl => write!(f, "glsl"),
            Language::Hlsl => write!(f, "hlsl"),
        }
    }
}

/// the graphics backend a render context was created with
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphicsApi {
    OpenGL,
    Direct3D11,
    Vulkan,
    Metal,
}

impl std::fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GraphicsApi::OpenGL => "OpenGL",
            GraphicsApi::Direct3D11 => "Direct3D 11",
            GraphicsApi::Vulkan => "Vulkan",
            GraphicsApi::Metal => "Metal",
        })
    }
}

/// the one capability shader generation needs from a render context
pub trait RenderContext {
    /// the backend whose shading language should be generated
    fn graphics_api(&self) -> GraphicsApi;
}

impl RenderContext for GraphicsApi {
    fn graphics_api(&self) -> GraphicsApi { *self }
}

impl<T: RenderContext + ?Sized> RenderContext for &T {
    fn graphics_api(&self) -> GraphicsApi { (**self).graphics_api() }
}
