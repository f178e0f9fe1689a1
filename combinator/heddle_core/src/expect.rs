//! Expectation points: mandatory-match markers and their error channel.
//!
//! Wrapping a parser in [`expect`] marks a grammar junction as mandatory:
//! once control reaches it, a mismatch is no longer an ordinary backtrackable
//! failure but a syntax error in the input. How that error leaves the wrapper
//! is decided by the [`ErrorChannel`] bound in the enclosing [`Context`]:
//!
//! - **`Raise`** (the default when nothing is bound): build an
//!   [`ExpectationFailure`] record and return [`Outcome::Fatal`], which every
//!   combinator propagates untouched until a catch point (normally the
//!   driver) observes it. Every choice point in between is cancelled.
//! - **`Flag`**: set the shared cell bound by an ancestor scope and return a
//!   plain [`Outcome::Mismatch`]. Combinators holding a choice point consult
//!   [`has_expectation_failure`] after every nested mismatch and refuse to
//!   continue once the flag is set.
//!
//! Either way the wrapper restores the scan to its entry position after
//! signaling, and the failure position recorded is the one the subject
//! actually reached.

use std::cell::Cell;

use heddle_scan::Scan;
use tracing::debug;

use crate::context::{Binding, Context};
use crate::outcome::Outcome;
use crate::Parser;

/// Policy for reporting an expectation failure.
///
/// Bound into a [`Context`] scope; absent binding behaves as `Raise`.
#[derive(Clone, Copy, Debug)]
pub enum ErrorChannel<'a> {
    /// Produce a fatal outcome that unwinds to the nearest catch point.
    Raise,
    /// Record the failure in a shared cell owned by an ancestor scope and
    /// return normally with an ordinary mismatch.
    Flag(&'a Cell<bool>),
}

/// Record of a failed expectation point.
///
/// Built at the moment the failure is signaled and never mutated afterwards.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("expected {expected} at offset {offset}")]
pub struct ExpectationFailure {
    offset: usize,
    expected: String,
}

impl ExpectationFailure {
    /// Create a record for a failure at `offset`.
    pub fn new(offset: usize, expected: impl Into<String>) -> Self {
        ExpectationFailure {
            offset,
            expected: expected.into(),
        }
    }

    /// Byte offset at which the expectation failed.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Description of what was expected there.
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

/// Check whether a fatal condition has been recorded on the active channel.
///
/// Reads the nearest bound flag cell; `false` under a raising channel, where
/// fatal conditions travel as [`Outcome::Fatal`] instead. Choice-point
/// combinators call this after every nested mismatch.
pub fn has_expectation_failure(ctx: &Context<'_>) -> bool {
    match ctx.error_channel() {
        ErrorChannel::Flag(cell) => cell.get(),
        ErrorChannel::Raise => false,
    }
}

/// Report an expectation failure at `offset` through the active channel.
///
/// `describe` is only evaluated when a record is actually built; synthesizing
/// a description can walk nested grammar structure, so the cost is deferred
/// to the raising path that needs it.
#[cold]
#[inline(never)]
pub fn signal_failure<T>(
    offset: usize,
    describe: impl FnOnce() -> String,
    ctx: &Context<'_>,
) -> Outcome<T> {
    match ctx.error_channel() {
        ErrorChannel::Raise => {
            let failure = ExpectationFailure::new(offset, describe());
            debug!(offset, expected = %failure.expected(), "expectation failure raised");
            Outcome::Fatal(failure)
        }
        ErrorChannel::Flag(cell) => {
            debug!(offset, "expectation failure flagged");
            cell.set(true);
            Outcome::Mismatch
        }
    }
}

/// Marks its subject as mandatory. See [`expect`].
#[derive(Clone, Debug)]
pub struct Expect<P> {
    subject: P,
}

/// Wrap `subject` so that its mismatch becomes an expectation failure.
///
/// On subject success the wrapper is a true no-op: same output, same final
/// scan position. On subject mismatch it signals through the bound channel
/// at the position the subject reached, then restores the entry position. A
/// fatal outcome coming out of the subject passes through untouched — the
/// innermost expectation point has already signaled, and stacked wrappers
/// must not signal again.
pub fn expect<P: Parser>(subject: P) -> Expect<P> {
    Expect { subject }
}

impl<P: Parser> Parser for Expect<P> {
    type Output = P::Output;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<P::Output> {
        let entry = scan.checkpoint();
        match self.subject.parse(scan, ctx) {
            matched @ Outcome::Matched(_) => matched,
            Outcome::Mismatch => {
                let outcome = signal_failure(scan.offset(), || self.subject.describe(), ctx);
                scan.rewind(entry);
                outcome
            }
            fatal @ Outcome::Fatal(_) => fatal,
        }
    }

    fn describe(&self) -> String {
        self.subject.describe()
    }

    // Repetition combinators accumulate through this protocol rather than
    // the single-shot path above. The subject keeps its own accumulation
    // behavior; the entry/signal/restore sequence wraps around it so a fatal
    // condition inside a repetition body cannot degrade into "no more
    // elements".
    fn parse_repeated(
        &self,
        scan: &mut Scan<'_>,
        ctx: &Context<'_>,
        out: &mut Vec<P::Output>,
    ) -> Outcome<()> {
        let entry = scan.checkpoint();
        match self.subject.parse_repeated(scan, ctx, out) {
            matched @ Outcome::Matched(()) => matched,
            Outcome::Mismatch => {
                let outcome = signal_failure(scan.offset(), || self.subject.describe(), ctx);
                scan.rewind(entry);
                outcome
            }
            fatal @ Outcome::Fatal(_) => fatal,
        }
    }
}

/// Runs its subject with an [`ErrorChannel`] bound for that subtree.
#[derive(Clone, Debug)]
pub struct WithChannel<'c, P> {
    channel: ErrorChannel<'c>,
    subject: P,
}

/// Bind `channel` for the dynamic extent of `subject`.
///
/// This is the scope-introduction form of [`Context::with`]: an enclosing
/// grammar region can opt a subtree into flagging (or back into raising)
/// independently of its surroundings.
pub fn with_channel<'c, P: Parser>(channel: ErrorChannel<'c>, subject: P) -> WithChannel<'c, P> {
    WithChannel { channel, subject }
}

impl<P: Parser> Parser for WithChannel<'_, P> {
    type Output = P::Output;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<P::Output> {
        let scoped = ctx.with(Binding::Expectation(self.channel));
        self.subject.parse(scan, &scoped)
    }

    fn describe(&self) -> String {
        self.subject.describe()
    }

    fn parse_repeated(
        &self,
        scan: &mut Scan<'_>,
        ctx: &Context<'_>,
        out: &mut Vec<P::Output>,
    ) -> Outcome<()> {
        let scoped = ctx.with(Binding::Expectation(self.channel));
        self.subject.parse_repeated(scan, &scoped, out)
    }
}
