//! Recursive-descent parser combinators with expectation points.
//!
//! Grammars are built once, at definition time, from value-composed
//! combinators, then run against a [`Scan`] cursor. Junctions wrapped in
//! [`expect`] are mandatory: reaching one and mismatching is a syntax error,
//! reported through the [`ErrorChannel`] bound in the enclosing [`Context`]
//! rather than through ordinary backtracking.
//!
//! ```
//! use heddle_core::{lit, parse_str, Outcome, Parser};
//!
//! let item = lit('x').then_expect(lit('i'));
//! assert!(matches!(parse_str("xi", &item), Outcome::Matched(_)));
//! // 'x' matched, so 'i' is mandatory: this is fatal, not a backtrack.
//! assert!(matches!(parse_str("xo", &item), Outcome::Fatal(_)));
//! ```

pub mod combinator;
mod context;
mod expect;
mod outcome;

#[cfg(test)]
mod tests;

pub use combinator::{
    alpha, any, digit, eoi, list, lit, one_or_more, opt, repeat, satisfy, text, zero_or_more,
    AnyChar, Eoi, List, Lit, Map, Opt, Or, Repeat, Satisfy, Text, Then,
};
pub use context::{Binding, Context, Tag};
pub use expect::{
    expect, has_expectation_failure, signal_failure, with_channel, ErrorChannel, Expect,
    ExpectationFailure, WithChannel,
};
pub use heddle_scan::{Checkpoint, Scan};
pub use outcome::Outcome;

/// The uniform "attempt match" capability implemented by every grammar node.
///
/// Implementations must uphold two laws the expectation mechanism builds on:
///
/// - **rollback law**: when `parse` returns [`Outcome::Mismatch`], the scan
///   is back at the offset it had on entry;
/// - **fatal law**: an [`Outcome::Fatal`] produced by a nested parser is
///   returned unchanged, never retried and never downgraded to a mismatch;
///   combinators holding a choice point consult
///   [`has_expectation_failure`] after every nested mismatch.
///
/// The trait is object-safe; boxed grammars compose like any other parser
/// through the forwarding impls on `&P` and `Box<P>`.
pub trait Parser {
    /// Value produced on a match.
    type Output;

    /// Attempt to match at the scan's current position.
    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<Self::Output>;

    /// Static description of what this parser accepts.
    ///
    /// Only evaluated when a failure record is built, so nested synthesis is
    /// acceptable here.
    fn describe(&self) -> String;

    /// Attempt to match, appending the result to a collection.
    ///
    /// Repetition-style combinators consume their body through this protocol
    /// instead of the single-shot `parse`. The default appends the
    /// single-shot result; wrappers that interpose on failure handling (see
    /// [`Expect`]) override it so their signaling survives this path too.
    fn parse_repeated(
        &self,
        scan: &mut Scan<'_>,
        ctx: &Context<'_>,
        out: &mut Vec<Self::Output>,
    ) -> Outcome<()> {
        match self.parse(scan, ctx) {
            Outcome::Matched(value) => {
                out.push(value);
                Outcome::Matched(())
            }
            Outcome::Mismatch => Outcome::Mismatch,
            Outcome::Fatal(failure) => Outcome::Fatal(failure),
        }
    }

    /// Sequence: this parser, then `next`; produces the pair of outputs.
    fn then<Q: Parser>(self, next: Q) -> Then<Self, Q>
    where
        Self: Sized,
    {
        Then::new(self, next)
    }

    /// Sequence with a mandatory tail: `next` is wrapped in [`expect`], so
    /// once `self` has matched, failing to match `next` is fatal.
    fn then_expect<Q: Parser>(self, next: Q) -> Then<Self, Expect<Q>>
    where
        Self: Sized,
    {
        Then::new(self, expect(next))
    }

    /// Ordered choice: this parser, or `alt` if this one softly mismatches.
    fn or<Q: Parser<Output = Self::Output>>(self, alt: Q) -> Or<Self, Q>
    where
        Self: Sized,
    {
        Or::new(self, alt)
    }

    /// Transform the output value.
    fn map<U, F: Fn(Self::Output) -> U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map::new(self, f)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<Self::Output> {
        (**self).parse(scan, ctx)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn parse_repeated(
        &self,
        scan: &mut Scan<'_>,
        ctx: &Context<'_>,
        out: &mut Vec<Self::Output>,
    ) -> Outcome<()> {
        (**self).parse_repeated(scan, ctx, out)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<Self::Output> {
        (**self).parse(scan, ctx)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn parse_repeated(
        &self,
        scan: &mut Scan<'_>,
        ctx: &Context<'_>,
        out: &mut Vec<Self::Output>,
    ) -> Outcome<()> {
        (**self).parse_repeated(scan, ctx, out)
    }
}

/// Run `parser` against `scan` under the root context.
///
/// No channel is bound, so an expectation failure comes back as
/// [`Outcome::Fatal`]; this function is the default catch point.
pub fn parse<P: Parser>(scan: &mut Scan<'_>, parser: &P) -> Outcome<P::Output> {
    parse_with(scan, parser, &Context::root())
}

/// Run `parser` against `scan` under a caller-built context chain.
pub fn parse_with<P: Parser>(
    scan: &mut Scan<'_>,
    parser: &P,
    ctx: &Context<'_>,
) -> Outcome<P::Output> {
    parser.parse(scan, ctx)
}

/// Run `parser` over `input` from the start, under the root context.
///
/// Convenience form of [`parse`] for callers that do not need the final
/// cursor position.
pub fn parse_str<P: Parser>(input: &str, parser: &P) -> Outcome<P::Output> {
    let mut scan = Scan::new(input);
    parse(&mut scan, parser)
}
