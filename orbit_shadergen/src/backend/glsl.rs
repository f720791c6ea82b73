//! glsl output: one source containing both stages, selected by the
//! `VERTEX`/`FRAGMENT` macros the graphics layer defines before compiling.
use std::fmt::Write;

use super::{
    RecordedStage, Result, indent::IndentTracker, join_sections, record_stage, render::Dialect, write_main,
};
use crate::{Binding, Interface, Language, ScalarKind, Settings, ShaderKind, ShaderProgram};

pub(crate) struct Glsl;

impl Dialect for Glsl {
    fn binding(binding: Binding, _: ShaderKind) -> String { binding.ident() }

    fn product(lhs: &str, rhs: &str, _: bool) -> String { format!("( {lhs} * {rhs} )") }

    fn mul_assign(lhs: &str, rhs: &str, _: bool) -> String { format!("{lhs} *= {rhs};") }

    fn sample(sampler: u32, coords: &str) -> String { format!("texture( sampler_{sampler}, {coords} )") }

    /// glsl clip space is the canonical one
    fn canonical_screen_pos(position: &str) -> String { position.to_string() }
}

/// default definitions of the macro vocabulary glsl output relies on.
///
/// expects `#version` (330 or later) and one of `VERTEX`/`FRAGMENT` to be
/// defined before it.
pub fn glsl_preamble() -> &'static str {
    "\
#if defined(VERTEX)
#define ORB_ATTRIBUTE(index) layout(location = index) in
#define ORB_VARYING out
#elif defined(FRAGMENT)
#define ORB_VARYING in
out vec4 orb_FragColor;
#define ORB_SET_OUT_COLOR(color) orb_FragColor = color
#endif
#define ORB_CONSTANTS_BEGIN(name) layout(std140) uniform name {
#define ORB_CONSTANTS_END };
#define ORB_CONSTANT(type, name) type name
"
}

#[track_caller]
pub(crate) fn emit<P: ShaderProgram + ?Sized>(program: &P, interface: &Interface, settings: &Settings) -> Result<String> {
    let vertex = record_stage(Language::Glsl, ShaderKind::Vertex, || program.vs_main());
    let fragment = record_stage(Language::Glsl, ShaderKind::Fragment, || program.ps_main());

    let ind = IndentTracker::new(settings.spaces_per_indent);
    let mut f = String::new();
    if settings.emit_glsl_preamble {
        writeln!(f, "{}", glsl_preamble())?;
    }

    writeln!(f, "#if defined(VERTEX)")?;
    f += &join_sections([
        vertex_inputs(interface)?,
        constants(&ind, "VertexConstants", interface, &vertex)?,
        samplers(&vertex)?,
        write_main(&ind, "void main()", &[], &vertex, |result| {
            vec![format!("gl_Position = {result};")]
        })?,
    ]);
    writeln!(f, "#elif defined(FRAGMENT)")?;
    f += &join_sections([
        varyings(interface, |b| fragment.used.contains(&b))?,
        constants(&ind, "FragmentConstants", interface, &fragment)?,
        samplers(&fragment)?,
        write_main(&ind, "void main()", &[], &fragment, |result| {
            vec![format!("ORB_SET_OUT_COLOR( {result} );")]
        })?,
    ]);
    writeln!(f, "#endif")?;
    Ok(f)
}

fn vertex_inputs(interface: &Interface) -> Result<String> {
    let mut f = String::new();
    for (slot, component) in interface.attributes().iter().enumerate() {
        let ty = component.data_type();
        writeln!(f, "ORB_ATTRIBUTE( {slot} ) {ty} attribute_{slot};")?;
    }
    f += &varyings(interface, |_| true)?;
    Ok(f)
}

/// the varyings `declare` accepts. Integers are not interpolated and need `flat`.
fn varyings(interface: &Interface, declare: impl Fn(Binding) -> bool) -> Result<String> {
    let mut f = String::new();
    for (slot, component) in interface.varyings().iter().enumerate() {
        if !declare(Binding::Varying(slot as u32)) {
            continue;
        }
        let ty = component.data_type();
        let flat = match component.scalar {
            ScalarKind::Int => "flat ",
            ScalarKind::Float => "",
        };
        writeln!(f, "{flat}ORB_VARYING {ty} varying_{slot};")?;
    }
    Ok(f)
}

/// the constants block of a stage, listing only uniforms the stage uses
fn constants(ind: &IndentTracker, block_name: &str, interface: &Interface, stage: &RecordedStage) -> Result<String> {
    let mut f = String::new();
    let mut used = stage.used_uniforms(interface).peekable();
    if used.peek().is_none() {
        return Ok(f);
    }
    let indent = ind.current();
    writeln!(f, "{indent}ORB_CONSTANTS_BEGIN( {block_name} )")?;
    {
        let indent = indent.deeper();
        for uniform in used {
            let ident = uniform.binding().ident();
            match uniform.array_len {
                Some(n) => writeln!(f, "{indent}ORB_CONSTANT( {}, {ident}[ {n} ] );", uniform.data_type)?,
                None => writeln!(f, "{indent}ORB_CONSTANT( {}, {ident} );", uniform.data_type)?,
            }
        }
    }
    writeln!(f, "{indent}ORB_CONSTANTS_END")?;
    Ok(f)
}

fn samplers(stage: &RecordedStage) -> Result<String> {
    let mut f = String::new();
    for i in stage.used_samplers() {
        writeln!(f, "uniform sampler2D sampler_{i};")?;
    }
    Ok(f)
}
