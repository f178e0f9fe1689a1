//! Scoped configuration chain threaded through a parse.
//!
//! A [`Context`] is an immutable, singly-linked chain of tagged bindings.
//! Scope-introducing combinators push a binding by value for the dynamic
//! extent of their subtree; nested parsers query the nearest enclosing
//! binding by tag. The chain is an explicit parameter on every parse call,
//! never thread-local or global, so independent parses can run concurrently
//! with no cross-talk.
//!
//! The only binding the library itself consumes is the expectation
//! [`ErrorChannel`]; see [`crate::expect`].

use crate::expect::ErrorChannel;

/// Keys identifying what a [`Binding`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// The error channel consulted when an expectation point fails.
    Expectation,
}

/// A single tagged value bound in a [`Context`] scope.
#[derive(Clone, Copy, Debug)]
pub enum Binding<'a> {
    /// Bind the expectation error channel for the enclosed subtree.
    Expectation(ErrorChannel<'a>),
}

impl Binding<'_> {
    /// The tag this binding answers to.
    pub const fn tag(&self) -> Tag {
        match self {
            Binding::Expectation(_) => Tag::Expectation,
        }
    }
}

/// Immutable chain of scoped bindings.
///
/// A child context borrows its parent, so the chain lives on the stack of
/// the enclosing parse invocation and unwinds with it. Lookup walks from the
/// innermost scope outward, so the nearest enclosing binding wins.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    binding: Option<Binding<'a>>,
}

impl<'a> Context<'a> {
    /// The empty chain used at the top of a parse. No channel is bound, so
    /// expectation failures are raised.
    pub const fn root() -> Context<'static> {
        Context {
            parent: None,
            binding: None,
        }
    }

    /// Push a binding for a nested scope.
    ///
    /// The returned context borrows `self`; drop it to pop the binding.
    pub const fn with(&'a self, binding: Binding<'a>) -> Context<'a> {
        Context {
            parent: Some(self),
            binding: Some(binding),
        }
    }

    /// Look up the nearest enclosing binding for `tag`.
    pub fn get(&self, tag: Tag) -> Option<&Binding<'a>> {
        let mut node = Some(self);
        while let Some(ctx) = node {
            match &ctx.binding {
                Some(binding) if binding.tag() == tag => return Some(binding),
                _ => node = ctx.parent,
            }
        }
        None
    }

    /// The active error channel: the nearest bound one, or the raising
    /// default when no scope bound a channel.
    pub fn error_channel(&self) -> ErrorChannel<'a> {
        match self.get(Tag::Expectation) {
            Some(Binding::Expectation(channel)) => *channel,
            None => ErrorChannel::Raise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn root_has_no_bindings() {
        let root = Context::root();
        assert!(root.get(Tag::Expectation).is_none());
        assert!(matches!(root.error_channel(), ErrorChannel::Raise));
    }

    #[test]
    fn with_pushes_a_binding() {
        let flag = Cell::new(false);
        let root = Context::root();
        let scoped = root.with(Binding::Expectation(ErrorChannel::Flag(&flag)));

        assert!(scoped.get(Tag::Expectation).is_some());
        assert!(matches!(scoped.error_channel(), ErrorChannel::Flag(_)));
        // The parent chain is untouched.
        assert!(root.get(Tag::Expectation).is_none());
    }

    #[test]
    fn nearest_enclosing_binding_wins() {
        let outer_flag = Cell::new(false);
        let root = Context::root();
        let outer = root.with(Binding::Expectation(ErrorChannel::Flag(&outer_flag)));
        let inner = outer.with(Binding::Expectation(ErrorChannel::Raise));

        assert!(matches!(inner.error_channel(), ErrorChannel::Raise));
        assert!(matches!(outer.error_channel(), ErrorChannel::Flag(_)));
    }

    #[test]
    fn lookup_walks_past_empty_scopes() {
        let flag = Cell::new(false);
        let root = Context::root();
        let outer = root.with(Binding::Expectation(ErrorChannel::Flag(&flag)));
        // A deeper scope with no binding of its own still sees the outer one.
        let inner = Context {
            parent: Some(&outer),
            binding: None,
        };

        match inner.get(Tag::Expectation) {
            Some(Binding::Expectation(ErrorChannel::Flag(cell))) => {
                cell.set(true);
                assert!(flag.get());
            }
            other => panic!("expected a flag binding, got {other:?}"),
        }
    }
}
