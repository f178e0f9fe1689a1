//! Three-way match result.
//!
//! Every parser invocation produces an [`Outcome`], which distinguishes:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Matched` | The parser matched and produced its output |
//! | `Mismatch` | Soft failure: backtrackable, carries no information |
//! | `Fatal` | Expectation failure: must propagate to the nearest catch point |
//!
//! The split between `Mismatch` and `Fatal` is the backbone of the
//! expectation mechanism. A `Mismatch` permits an enclosing alternative to
//! try its next branch; a `Fatal` cancels every pending choice point between
//! the failure site and the driver (or an enclosing [`with_channel`] scope).
//! No combinator may coerce `Fatal` into `Mismatch`.
//!
//! [`with_channel`]: crate::with_channel

use crate::expect::ExpectationFailure;

/// Result of one parser invocation.
///
/// # Variants
///
/// - `Matched`: the subject matched; the scan sits after the consumed input.
/// - `Mismatch`: the subject did not match; the scan sits back at the
///   position where the attempt started.
/// - `Fatal`: an expectation point failed; the record pins down where and
///   what was expected. Composition layers return this unchanged.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Matched; carries the produced value.
    Matched(T),
    /// Soft failure. Backtrackable, no payload.
    Mismatch,
    /// Fatal failure at an expectation point.
    Fatal(ExpectationFailure),
}

impl<T> Outcome<T> {
    /// Returns `true` if the parser matched.
    #[inline]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Returns `true` on a soft failure.
    #[inline]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }

    /// Returns `true` on a fatal failure.
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Map the matched value, preserving the failure variants.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Matched(value) => Outcome::Matched(f(value)),
            Self::Mismatch => Outcome::Mismatch,
            Self::Fatal(failure) => Outcome::Fatal(failure),
        }
    }

    /// Convert to `Option`, discarding failure information.
    pub fn matched(self) -> Option<T> {
        match self {
            Self::Matched(value) => Some(value),
            Self::Mismatch | Self::Fatal(_) => None,
        }
    }

    /// Convert to a `Result` for `?`-style callers.
    ///
    /// `Matched` becomes `Ok(Some(..))`, `Mismatch` becomes `Ok(None)`, and
    /// `Fatal` surfaces the failure record as the error.
    pub fn into_result(self) -> Result<Option<T>, ExpectationFailure> {
        match self {
            Self::Matched(value) => Ok(Some(value)),
            Self::Mismatch => Ok(None),
            Self::Fatal(failure) => Err(failure),
        }
    }

    /// Unwrap the matched value, panicking on either failure variant.
    ///
    /// # Panics
    ///
    /// Panics if this is `Mismatch` or `Fatal`.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Matched(value) => value,
            Self::Mismatch => panic!("called `Outcome::unwrap()` on `Mismatch`"),
            Self::Fatal(failure) => {
                panic!("called `Outcome::unwrap()` on `Fatal`: {failure}")
            }
        }
    }
}

impl<T> From<Outcome<T>> for Result<Option<T>, ExpectationFailure> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Propagate both failure variants of an [`Outcome`], yielding the value.
///
/// The combinator-body equivalent of `?`: `Matched` evaluates to the inner
/// value, `Mismatch` and `Fatal` return early from the enclosing function.
/// Use it only where no rollback is needed on the mismatch path; combinators
/// that must restore a checkpoint first match on the outcome explicitly.
///
/// # Usage
///
/// ```ignore
/// fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<u32> {
///     let digits = try_match!(self.digits.parse(scan, ctx));
///     Outcome::Matched(digits.len() as u32)
/// }
/// ```
#[macro_export]
macro_rules! try_match {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Matched(value) => value,
            $crate::Outcome::Mismatch => return $crate::Outcome::Mismatch,
            $crate::Outcome::Fatal(failure) => return $crate::Outcome::Fatal(failure),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failure() -> ExpectationFailure {
        ExpectationFailure::new(3, "'x'")
    }

    #[test]
    fn predicates_cover_all_variants() {
        assert!(Outcome::Matched(1).is_match());
        assert!(Outcome::<i32>::Mismatch.is_mismatch());
        assert!(Outcome::<i32>::Fatal(failure()).is_fatal());
    }

    #[test]
    fn map_preserves_failures() {
        assert_eq!(Outcome::Matched(2).map(|n| n * 2), Outcome::Matched(4));
        assert_eq!(Outcome::<i32>::Mismatch.map(|n| n * 2), Outcome::Mismatch);
        assert_eq!(
            Outcome::<i32>::Fatal(failure()).map(|n| n * 2),
            Outcome::Fatal(failure())
        );
    }

    #[test]
    fn into_result_keeps_the_three_outcomes_apart() {
        assert_eq!(Outcome::Matched(1).into_result(), Ok(Some(1)));
        assert_eq!(Outcome::<i32>::Mismatch.into_result(), Ok(None));
        assert_eq!(
            Outcome::<i32>::Fatal(failure()).into_result(),
            Err(failure())
        );
    }

    #[test]
    fn matched_discards_failures() {
        assert_eq!(Outcome::Matched('a').matched(), Some('a'));
        assert_eq!(Outcome::<char>::Mismatch.matched(), None);
        assert_eq!(Outcome::<char>::Fatal(failure()).matched(), None);
    }

    #[test]
    #[should_panic(expected = "Mismatch")]
    fn unwrap_panics_on_mismatch() {
        let _ = Outcome::<i32>::Mismatch.unwrap();
    }
}
