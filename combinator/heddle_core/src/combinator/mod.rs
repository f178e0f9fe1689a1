//! The combinator catalogue.
//!
//! Primitives match single characters or fixed text; composites build
//! sequences, alternatives and repetitions out of other parsers. Every
//! combinator here upholds two laws the expectation mechanism depends on:
//!
//! - **rollback law**: returning [`Mismatch`] leaves the scan at the
//!   combinator's entry offset;
//! - **fatal law**: a [`Fatal`] outcome from a nested call is returned
//!   unchanged, and after a nested mismatch every choice point consults
//!   [`has_expectation_failure`] before trying anything else.
//!
//! [`Mismatch`]: crate::Outcome::Mismatch
//! [`Fatal`]: crate::Outcome::Fatal
//! [`has_expectation_failure`]: crate::has_expectation_failure

mod choice;
mod primitive;
mod repeat;
mod sequence;

pub use choice::{opt, Opt, Or};
pub use primitive::{alpha, any, digit, eoi, lit, satisfy, text, AnyChar, Eoi, Lit, Satisfy, Text};
pub use repeat::{list, one_or_more, repeat, zero_or_more, List, Repeat};
pub use sequence::{Map, Then};
