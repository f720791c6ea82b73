/// ## configure shader generation
/// this struct only has public fields and is expected to be filled out via
/// its constructor.
///
/// ## example
/// ```
/// orbit_shadergen::Settings {
///     spaces_per_indent: 2,
///     ..Default::default()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Settings {
    /// indentation width of the generated code
    pub spaces_per_indent: u16,
    /// `register( b<N> )` slot of the hlsl vertex stage `cbuffer`
    pub vertex_uniforms_register: u32,
    /// `register( b<N> )` slot of the hlsl pixel stage `cbuffer`
    pub pixel_uniforms_register: u32,
    /// whether glsl output starts with the default `ORB_*` macro definitions
    /// (see [`glsl_preamble`](crate::glsl_preamble)).
    ///
    /// leave this disabled if the graphics layer compiling the shader
    /// provides its own definitions.
    pub emit_glsl_preamble: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::default() // call const version
    }
}

impl Settings {
    /// the default shader generation settings.
    ///
    /// Same as [`Default::default()`], except this function is `const`
    pub const fn default() -> Self {
        Self {
            spaces_per_indent: 4,
            vertex_uniforms_register: 0,
            pixel_uniforms_register: 1,
            emit_glsl_preamble: false,
        }
    }
}
