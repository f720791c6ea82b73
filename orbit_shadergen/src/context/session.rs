use std::{cell::RefCell, collections::BTreeSet};

use super::Unsend;
use crate::{
    DataType,
    backend::render::{self, Target},
    error::{Error, fail},
    expr::node::{AssignOp, Binding, Node},
};

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// the statements and interface usage of one shader stage while it is being emitted
#[derive(Debug)]
pub(crate) struct Session {
    target: Target,
    statements: Vec<String>,
    /// every binding referenced by a recorded statement or rendered value
    used: BTreeSet<Binding>,
    next_local: u32,
}

/// While alive, statements recorded on this thread are appended to the
/// session's stage. Removes the session on drop.
pub(crate) struct SessionGuard(Unsend);

impl SessionGuard {
    /// starts emitting a stage on this thread.
    /// Fails if another stage is still being emitted.
    pub fn open(target: Target) -> Result<SessionGuard, Error> {
        SESSION.with(|s| match &mut *s.borrow_mut() {
            Some(_) => Err(Error::EmissionSessionOccupied),
            s @ None => {
                *s = Some(Session {
                    target,
                    statements: Vec::new(),
                    used: BTreeSet::new(),
                    next_local: 0,
                });
                Ok(SessionGuard(Default::default()))
            }
        })
    }

    /// ends the session, returning what was recorded into it
    pub fn finish(self) -> Option<Session> { SESSION.with(|s| s.borrow_mut().take()) }
}

impl Drop for SessionGuard {
    fn drop(&mut self) { SESSION.with(|s| s.borrow_mut().take()); }
}

/// runs `f` on the session of the stage that is currently being emitted
#[track_caller]
pub(crate) fn with_session<R>(what: &'static str, f: impl FnOnce(&mut Session) -> R) -> R {
    let result = SESSION.with(|s| s.borrow_mut().as_mut().map(f));
    match result {
        Some(r) => r,
        None => fail(Error::NoEmissionSession(what)),
    }
}

impl Session {
    pub fn target(&self) -> Target { self.target }

    pub fn statements(&self) -> &[String] { &self.statements }

    pub fn used(&self) -> &BTreeSet<Binding> { &self.used }

    pub fn allocate_local(&mut self) -> u32 {
        let local = self.next_local;
        self.next_local += 1;
        local
    }

    /// the text of `node` in this session's language and stage.
    /// Marks every binding within `node` as used by this stage.
    #[track_caller]
    pub fn render(&mut self, node: &Node) -> String {
        node.visit_bindings(&mut |b| {
            self.used.insert(b);
        });
        render::write_node(node, self.target)
    }

    /// `<ty> local_N = <init>;` or `<ty> local_N;`
    #[track_caller]
    pub fn record_definition(&mut self, ty: DataType, local: u32, init: Option<&Node>) {
        let init = init.map(|node| self.render(node));
        self.push(render::write_definition(ty, local, init.as_deref()))
    }

    /// `<target> <op> <value>;`
    #[track_caller]
    pub fn record_assignment(&mut self, target: &Node, op: AssignOp, value: &Node, matrix: bool) {
        let target_str = self.render(target);
        let value_str = self.render(value);
        let stmt = render::write_assignment(self.target.language, &target_str, op, &value_str, matrix);
        self.push(stmt)
    }

    fn push(&mut self, stmt: String) {
        tracing::trace!(stage = %self.target.kind, language = %self.target.language, "{stmt}");
        self.statements.push(stmt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Language, ShaderKind};

    const HLSL_VERTEX: Target = Target {
        language: Language::Hlsl,
        kind: ShaderKind::Vertex,
    };

    #[test]
    fn records_statements_and_usage() {
        let guard = SessionGuard::open(HLSL_VERTEX).unwrap();
        assert_eq!(SessionGuard::open(HLSL_VERTEX).err(), Some(Error::EmissionSessionOccupied));

        with_session("test", |s| {
            let local = s.allocate_local();
            s.record_definition(DataType::FVec3, local, Some(&Node::Binding(Binding::Attribute(1))));
            let text = s.render(&Node::Binding(Binding::Uniform(4)));
            assert_eq!(text, "uniform_4");
        });

        let session = guard.finish().unwrap();
        assert_eq!(session.statements(), &["vec3 local_0 = input.attribute_1;"]);
        assert_eq!(
            session.used().iter().copied().collect::<Vec<_>>(),
            [Binding::Attribute(1), Binding::Uniform(4)]
        );
        assert!(SESSION.with(|s| s.borrow().is_none()));
    }

    #[test]
    fn dropping_the_guard_ends_the_session() {
        drop(SessionGuard::open(HLSL_VERTEX).unwrap());
        drop(SessionGuard::open(HLSL_VERTEX).unwrap());
    }
}
