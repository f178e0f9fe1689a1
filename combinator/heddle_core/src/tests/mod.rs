//! Expectation mechanism tests.
//!
//! Tests are organized into modules by category:
//! - `expectation`: scenario suite for expectation points composed with the
//!   whole combinator catalogue
//! - `laws`: the rollback and fatal laws every combinator upholds, plus the
//!   extension protocol for hand-written parsers
//! - `properties`: property-based checks for the wrapper identities
