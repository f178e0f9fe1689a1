//! Sequencing and output-shaping combinators.

use heddle_scan::Scan;

use crate::context::Context;
use crate::outcome::Outcome;
use crate::Parser;

/// Runs two parsers in order, producing a pair. Built by [`Parser::then`].
///
/// A mismatch of either element restores the entry position. A fatal outcome
/// from either element propagates untouched — in particular, the second
/// element failing fatally does not roll the first element's consumption
/// back, mirroring how divergence skips enclosing restore points.
#[derive(Clone, Copy, Debug)]
pub struct Then<L, R> {
    first: L,
    second: R,
}

impl<L, R> Then<L, R> {
    pub(crate) fn new(first: L, second: R) -> Self {
        Then { first, second }
    }
}

impl<L: Parser, R: Parser> Parser for Then<L, R> {
    type Output = (L::Output, R::Output);

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<(L::Output, R::Output)> {
        let entry = scan.checkpoint();
        let first = match self.first.parse(scan, ctx) {
            Outcome::Matched(value) => value,
            Outcome::Mismatch => {
                scan.rewind(entry);
                return Outcome::Mismatch;
            }
            Outcome::Fatal(failure) => return Outcome::Fatal(failure),
        };
        match self.second.parse(scan, ctx) {
            Outcome::Matched(second) => Outcome::Matched((first, second)),
            Outcome::Mismatch => {
                scan.rewind(entry);
                Outcome::Mismatch
            }
            Outcome::Fatal(failure) => Outcome::Fatal(failure),
        }
    }

    fn describe(&self) -> String {
        format!("{} then {}", self.first.describe(), self.second.describe())
    }
}

/// Transforms a parser's output. Built by [`Parser::map`].
#[derive(Clone, Copy, Debug)]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<P, F> Map<P, F> {
    pub(crate) fn new(parser: P, f: F) -> Self {
        Map { parser, f }
    }
}

impl<P: Parser, U, F: Fn(P::Output) -> U> Parser for Map<P, F> {
    type Output = U;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<U> {
        self.parser.parse(scan, ctx).map(|value| (self.f)(value))
    }

    fn describe(&self) -> String {
        self.parser.describe()
    }
}
