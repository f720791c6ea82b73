//! hlsl (shader model 4+) output. Declarations shared by both stages come
//! first, stage specific constant buffers and entry points are selected by
//! the `VERTEX`/`FRAGMENT` macros.
use std::{collections::BTreeMap, fmt::Write};

use super::{
    RecordedStage, Result, indent::IndentTracker, join_sections, record_stage, render::Dialect, write_main,
};
use crate::{Binding, DataType, Interface, Language, Settings, ShaderKind, ShaderProgram, VertexLayout};

pub(crate) struct Hlsl;

impl Dialect for Hlsl {
    fn binding(binding: Binding, kind: ShaderKind) -> String {
        match (binding, kind) {
            (Binding::Attribute(_), _) => format!("input.{binding}"),
            (Binding::Varying(_), ShaderKind::Vertex) => format!("output.{binding}"),
            (Binding::Varying(_), ShaderKind::Fragment) => format!("input.{binding}"),
            (Binding::Uniform(_) | Binding::Sampler(_), _) => binding.ident(),
        }
    }

    /// hlsl `*` is component wise, matrix products go through `mul` with
    /// swapped operands since constants are uploaded in glsl's column major order
    fn product(lhs: &str, rhs: &str, matrix: bool) -> String {
        match matrix {
            true => format!("mul( {rhs}, {lhs} )"),
            false => format!("( {lhs} * {rhs} )"),
        }
    }

    fn mul_assign(lhs: &str, rhs: &str, matrix: bool) -> String {
        match matrix {
            true => format!("{lhs} = mul( {rhs}, {lhs} );"),
            false => format!("{lhs} *= {rhs};"),
        }
    }

    fn sample(sampler: u32, coords: &str) -> String { format!("texture_{sampler}.Sample( sampler_{sampler}, {coords} )") }

    fn canonical_screen_pos(position: &str) -> String { format!("CanonicalScreenPos( {position} )") }
}

const TYPE_ALIASES: [(DataType, &str); 7] = [
    (DataType::FVec2, "float2"),
    (DataType::FVec3, "float3"),
    (DataType::FVec4, "float4"),
    (DataType::Mat4, "float4x4"),
    (DataType::IVec2, "int2"),
    (DataType::IVec3, "int3"),
    (DataType::IVec4, "int4"),
];

/// maps clip space depth from glsl's `[-w, w]` to direct3d's `[0, w]`
const CANONICAL_SCREEN_POS: &str =
    "float4 CanonicalScreenPos( float4 p ) { return float4( p.xy, ( p.z + p.w ) * 0.5, p.w ); }";

#[track_caller]
pub(crate) fn emit<P: ShaderProgram + ?Sized>(program: &P, interface: &Interface, settings: &Settings) -> Result<String> {
    let vertex = record_stage(Language::Hlsl, ShaderKind::Vertex, || program.vs_main());
    let fragment = record_stage(Language::Hlsl, ShaderKind::Fragment, || program.ps_main());

    let ind = IndentTracker::new(settings.spaces_per_indent);
    let mut f = String::new();

    f += &join_sections([
        type_aliases()?,
        format!("{CANONICAL_SCREEN_POS}\n"),
        samplers(interface)?,
        vertex_data(&ind, interface.attributes())?,
        pixel_data(&ind, interface.varyings())?,
    ]);
    writeln!(f)?;

    writeln!(f, "#if defined(VERTEX)")?;
    let register = settings.vertex_uniforms_register;
    f += &join_sections([
        constant_buffer(&ind, "VertexUniforms", register, interface, &vertex)?,
        write_main(&ind, "PixelData VSMain( VertexData input )", &["PixelData output;"], &vertex, |result| {
            vec![format!("output.position = {result};"), "return output;".to_string()]
        })?,
    ]);
    writeln!(f, "#elif defined(FRAGMENT)")?;
    let register = settings.pixel_uniforms_register;
    f += &join_sections([
        constant_buffer(&ind, "PixelUniforms", register, interface, &fragment)?,
        write_main(&ind, "float4 PSMain( PixelData input ) : SV_TARGET", &[], &fragment, |result| {
            vec![format!("return {result};")]
        })?,
    ]);
    writeln!(f, "#endif")?;
    Ok(f)
}

fn type_aliases() -> Result<String> {
    let mut f = String::new();
    for (ty, alias) in TYPE_ALIASES {
        writeln!(f, "#define {ty} {alias}")?;
    }
    Ok(f)
}

/// textures and samplers are declared for both stages, one register pair per sampler
fn samplers(interface: &Interface) -> Result<String> {
    let mut f = String::new();
    for i in 0..interface.sampler_count() {
        writeln!(f, "Texture2D texture_{i} : register( t{i} );")?;
        writeln!(f, "SamplerState sampler_{i} : register( s{i} );")?;
    }
    Ok(f)
}

/// semantic names, with an index appended from the second occurrence on
/// (`TEXCOORD`, `TEXCOORD1`, ...)
#[derive(Default)]
struct Semantics(BTreeMap<&'static str, u32>);

impl Semantics {
    fn next(&mut self, semantic: &'static str) -> String {
        let count = self.0.entry(semantic).or_default();
        let s = match *count {
            0 => semantic.to_string(),
            n => format!("{semantic}{n}"),
        };
        *count += 1;
        s
    }
}

fn vertex_data(ind: &IndentTracker, attributes: &VertexLayout) -> Result<String> {
    let mut f = String::new();
    let mut semantics = Semantics::default();
    let indent = ind.current();
    writeln!(f, "{indent}struct VertexData")?;
    writeln!(f, "{indent}{{")?;
    {
        let indent = indent.deeper();
        for (slot, component) in attributes.iter().enumerate() {
            let semantic = semantics.next(component.semantic);
            writeln!(f, "{indent}{} attribute_{slot} : {semantic};", component.data_type())?;
        }
    }
    writeln!(f, "{indent}}};")?;
    Ok(f)
}

fn pixel_data(ind: &IndentTracker, varyings: &VertexLayout) -> Result<String> {
    let mut f = String::new();
    let mut semantics = Semantics::default();
    let indent = ind.current();
    writeln!(f, "{indent}struct PixelData")?;
    writeln!(f, "{indent}{{")?;
    {
        let indent = indent.deeper();
        writeln!(f, "{indent}vec4 position : SV_POSITION;")?;
        for (slot, component) in varyings.iter().enumerate() {
            let semantic = semantics.next(component.semantic);
            writeln!(f, "{indent}{} varying_{slot} : {semantic};", component.data_type())?;
        }
    }
    writeln!(f, "{indent}}};")?;
    Ok(f)
}

/// a stage's constant buffer, listing only uniforms the stage uses.
/// Empty if the stage uses none.
fn constant_buffer(
    ind: &IndentTracker,
    name: &str,
    register: u32,
    interface: &Interface,
    stage: &RecordedStage,
) -> Result<String> {
    let mut f = String::new();
    let mut used = stage.used_uniforms(interface).peekable();
    if used.peek().is_none() {
        return Ok(f);
    }
    let indent = ind.current();
    writeln!(f, "{indent}cbuffer {name} : register( b{register} )")?;
    writeln!(f, "{indent}{{")?;
    {
        let indent = indent.deeper();
        for uniform in used {
            let ident = uniform.binding().ident();
            match uniform.array_len {
                Some(n) => writeln!(f, "{indent}{} {ident}[ {n} ];", uniform.data_type)?,
                None => writeln!(f, "{indent}{} {ident};", uniform.data_type)?,
            }
        }
    }
    writeln!(f, "{indent}}};")?;
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_semantics_are_indexed() {
        let mut s = Semantics::default();
        assert_eq!(s.next("TEXCOORD"), "TEXCOORD");
        assert_eq!(s.next("NORMAL"), "NORMAL");
        assert_eq!(s.next("TEXCOORD"), "TEXCOORD1");
        assert_eq!(s.next("TEXCOORD"), "TEXCOORD2");
    }

    #[test]
    fn matrix_products_swap_operands() {
        assert_eq!(Hlsl::product("uniform_0", "input.attribute_0", true), "mul( input.attribute_0, uniform_0 )");
        assert_eq!(Hlsl::product("local_0", "2.0", false), "( local_0 * 2.0 )");
        assert_eq!(Hlsl::mul_assign("local_1", "uniform_2", true), "local_1 = mul( uniform_2, local_1 );");
    }

    #[test]
    fn bindings_depend_on_stage() {
        let v = Binding::Varying(2);
        assert_eq!(Hlsl::binding(v, ShaderKind::Vertex), "output.varying_2");
        assert_eq!(Hlsl::binding(v, ShaderKind::Fragment), "input.varying_2");
        assert_eq!(Hlsl::binding(Binding::Uniform(0), ShaderKind::Fragment), "uniform_0");
    }
}
