use std::cell::RefCell;

use super::Unsend;
use crate::{
    Interface,
    error::{Error, fail},
};

thread_local! {
    static DECLARATION: RefCell<Option<Interface>> = const { RefCell::new(None) };
}

/// While alive, interface values (attributes, varyings, uniforms, samplers)
/// constructed on this thread register into the shader being declared.
/// Removes the declaration on drop.
pub(crate) struct DeclarationGuard(Unsend);

impl DeclarationGuard {
    /// starts declaring a new shader on this thread.
    /// Fails if another shader is still being declared.
    pub fn open() -> Result<DeclarationGuard, Error> {
        DECLARATION.with(|d| match &mut *d.borrow_mut() {
            Some(_) => Err(Error::DeclarationScopeOccupied),
            d @ None => {
                *d = Some(Interface::default());
                Ok(DeclarationGuard(Default::default()))
            }
        })
    }

    /// ends the declaration, returning everything that registered into it
    pub fn finish(self) -> Interface {
        let taken = DECLARATION.with(|d| d.borrow_mut().take());
        taken.unwrap_or_default()
    }
}

impl Drop for DeclarationGuard {
    fn drop(&mut self) { DECLARATION.with(|d| d.borrow_mut().take()); }
}

/// runs `f` on the interface of the shader that is currently being declared
#[track_caller]
pub(crate) fn with_declaration<R>(what: &'static str, f: impl FnOnce(&mut Interface) -> R) -> R {
    let result = DECLARATION.with(|d| d.borrow_mut().as_mut().map(f));
    match result {
        Some(r) => r,
        None => fail(Error::NoDeclarationScope(what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VertexComponent;

    #[test]
    fn scope_is_exclusive() {
        let guard = DeclarationGuard::open().unwrap();
        assert_eq!(DeclarationGuard::open().err(), Some(Error::DeclarationScopeOccupied));

        with_declaration("test", |i| i.add_attribute(VertexComponent::Normal));
        let interface = guard.finish();
        assert_eq!(interface.attributes().components(), &[VertexComponent::Normal]);

        // the slot is free again
        drop(DeclarationGuard::open().unwrap());
    }

    #[test]
    #[should_panic(expected = "no shader is being declared")]
    fn registering_without_scope_fails() {
        with_declaration("Attribute", |i| i.add_sampler());
    }
}
