use std::collections::BTreeSet;

use crate::{
    Binding, DataType, Interface, ShaderKind, UniformSlot, Variable,
    context::session::SessionGuard,
    error::{Error, OrFail, fail},
};

pub(crate) mod glsl;
pub(crate) mod hlsl;
pub(crate) mod indent;
mod language;
pub(crate) mod render;

pub use glsl::glsl_preamble;
pub use language::*;
use indent::IndentTracker;
use render::Target;

pub(crate) type Result<T> = std::result::Result<T, std::fmt::Error>;

/// the main function body of one stage together with the interface values it touched
#[derive(Debug)]
pub(crate) struct RecordedStage {
    pub statements: Vec<String>,
    /// expression text of the value returned from the stage's main function
    pub result: String,
    pub used: BTreeSet<Binding>,
}

impl RecordedStage {
    /// uniforms referenced by this stage, in declaration order
    pub fn used_uniforms<'a>(&'a self, interface: &'a Interface) -> impl Iterator<Item = &'a UniformSlot> + 'a {
        interface.uniforms().iter().filter(|u| self.used.contains(&u.binding()))
    }

    /// indices of the samplers referenced by this stage
    pub fn used_samplers(&self) -> impl Iterator<Item = u32> + '_ {
        self.used.iter().filter_map(|b| match b {
            Binding::Sampler(i) => Some(*i),
            _ => None,
        })
    }
}

/// runs a stage's main function within a fresh emission session.
///
/// statements recorded while `main` runs become the body of the stage, the
/// returned value has to be a `vec4` (clip space position or color).
#[track_caller]
pub(crate) fn record_stage(language: crate::Language, kind: ShaderKind, main: impl FnOnce() -> Variable) -> RecordedStage {
    let guard = SessionGuard::open(Target { language, kind }).or_fail();
    let returned = main();
    if returned.data_type() != DataType::FVec4 {
        fail(Error::TypeMismatch(format!(
            "the {kind} stage has to return a `vec4`, found `{}`",
            returned.data_type()
        )))
    }
    let result = returned.value();
    let Some(session) = guard.finish() else {
        unreachable!("emission session of the {kind} stage vanished while it was open")
    };
    tracing::debug!(
        %language,
        stage = %kind,
        statements = session.statements().len(),
        used = ?session.used(),
        "recorded shader stage"
    );
    RecordedStage {
        used: session.used().clone(),
        statements: session.statements().to_vec(),
        result,
    }
}

/// joins the non-empty `sections` with an empty line in between
pub(crate) fn join_sections<const N: usize>(sections: [String; N]) -> String {
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// ```text
/// <signature>
/// {
///     <head>
///     <stage statements>
///     <tail(result)>
/// }
/// ```
pub(crate) fn write_main(
    ind: &IndentTracker,
    signature: &str,
    head: &[&str],
    stage: &RecordedStage,
    tail: impl FnOnce(&str) -> Vec<String>,
) -> Result<String> {
    use std::fmt::Write;

    let mut f = String::new();
    let indent = ind.current();
    writeln!(f, "{indent}{signature}")?;
    writeln!(f, "{indent}{{")?;
    {
        let indent = indent.deeper();
        let tail = tail(&stage.result);
        let lines = head.iter().copied().chain(stage.statements.iter().map(String::as_str));
        for line in lines.chain(tail.iter().map(String::as_str)) {
            writeln!(f, "{indent}{line}")?;
        }
    }
    writeln!(f, "{indent}}}")?;
    Ok(f)
}
