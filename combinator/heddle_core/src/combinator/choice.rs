//! Alternative and optional combinators.
//!
//! These are the choice points the expectation mechanism constrains: once a
//! fatal condition is recorded they must stop, not fall back. Under a raising
//! channel that happens naturally, since `Fatal` propagates; under a flagging
//! channel each nested mismatch is followed by a
//! [`has_expectation_failure`] check.

use heddle_scan::Scan;

use crate::context::Context;
use crate::expect::has_expectation_failure;
use crate::outcome::Outcome;
use crate::Parser;

/// Ordered choice between two parsers of the same output. Built by
/// [`Parser::or`].
#[derive(Clone, Copy, Debug)]
pub struct Or<L, R> {
    first: L,
    second: R,
}

impl<L, R> Or<L, R> {
    pub(crate) fn new(first: L, second: R) -> Self {
        Or { first, second }
    }
}

impl<L: Parser, R: Parser<Output = L::Output>> Parser for Or<L, R> {
    type Output = L::Output;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<L::Output> {
        let entry = scan.checkpoint();
        match self.first.parse(scan, ctx) {
            matched @ Outcome::Matched(_) => return matched,
            Outcome::Fatal(failure) => return Outcome::Fatal(failure),
            Outcome::Mismatch => {}
        }
        // A flagged fatal inside the first branch forbids the fallback.
        if has_expectation_failure(ctx) {
            return Outcome::Mismatch;
        }
        scan.rewind(entry);
        self.second.parse(scan, ctx)
    }

    fn describe(&self) -> String {
        format!("{} or {}", self.first.describe(), self.second.describe())
    }
}

/// Optional parser; mismatch becomes `None`. See [`opt`].
#[derive(Clone, Copy, Debug)]
pub struct Opt<P> {
    subject: P,
}

/// Match `subject` if possible, succeeding with `None` when it softly
/// mismatches. A fatal condition inside the subject is not absorbed.
pub fn opt<P: Parser>(subject: P) -> Opt<P> {
    Opt { subject }
}

impl<P: Parser> Parser for Opt<P> {
    type Output = Option<P::Output>;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<Option<P::Output>> {
        let entry = scan.checkpoint();
        match self.subject.parse(scan, ctx) {
            Outcome::Matched(value) => Outcome::Matched(Some(value)),
            Outcome::Fatal(failure) => Outcome::Fatal(failure),
            Outcome::Mismatch => {
                if has_expectation_failure(ctx) {
                    return Outcome::Mismatch;
                }
                scan.rewind(entry);
                Outcome::Matched(None)
            }
        }
    }

    fn describe(&self) -> String {
        format!("optional {}", self.subject.describe())
    }
}
