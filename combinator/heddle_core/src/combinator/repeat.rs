//! Repetition combinators.
//!
//! Repetition accumulates elements through [`Parser::parse_repeated`], the
//! collection protocol, rather than the single-shot path. That keeps an
//! expectation-wrapped body signaling through the same sequence it would use
//! anywhere else: a fatal condition inside an iteration ends the whole
//! repetition fatally instead of reading as ordinary exhaustion.

use heddle_scan::Scan;

use crate::context::Context;
use crate::expect::has_expectation_failure;
use crate::outcome::Outcome;
use crate::Parser;

/// Bounded or unbounded repetition of one body parser.
///
/// Built by [`zero_or_more`], [`one_or_more`] or [`repeat`]. A body that can
/// succeed without consuming input makes an unbounded repetition loop
/// forever; bound such bodies with [`repeat`].
#[derive(Clone, Copy, Debug)]
pub struct Repeat<P> {
    body: P,
    min: usize,
    max: Option<usize>,
}

/// Zero or more occurrences of `body`.
pub fn zero_or_more<P: Parser>(body: P) -> Repeat<P> {
    Repeat {
        body,
        min: 0,
        max: None,
    }
}

/// One or more occurrences of `body`.
pub fn one_or_more<P: Parser>(body: P) -> Repeat<P> {
    Repeat {
        body,
        min: 1,
        max: None,
    }
}

/// Between `min` and `max` occurrences of `body`, inclusive.
pub fn repeat<P: Parser>(body: P, min: usize, max: usize) -> Repeat<P> {
    debug_assert!(min <= max, "repeat bounds are inverted: {min} > {max}");
    Repeat {
        body,
        min,
        max: Some(max),
    }
}

impl<P: Parser> Repeat<P> {
    fn fill(
        &self,
        scan: &mut Scan<'_>,
        ctx: &Context<'_>,
        out: &mut Vec<P::Output>,
    ) -> Outcome<()> {
        let mut count = 0;
        loop {
            if self.max == Some(count) {
                break;
            }
            match self.body.parse_repeated(scan, ctx, out) {
                Outcome::Matched(()) => count += 1,
                Outcome::Fatal(failure) => return Outcome::Fatal(failure),
                Outcome::Mismatch => {
                    // A flagged fatal inside the body is not exhaustion.
                    if has_expectation_failure(ctx) {
                        return Outcome::Mismatch;
                    }
                    break;
                }
            }
        }
        if count < self.min {
            Outcome::Mismatch
        } else {
            Outcome::Matched(())
        }
    }
}

impl<P: Parser> Parser for Repeat<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<Vec<P::Output>> {
        let entry = scan.checkpoint();
        let mut items = Vec::new();
        match self.fill(scan, ctx, &mut items) {
            Outcome::Matched(()) => Outcome::Matched(items),
            Outcome::Mismatch => {
                scan.rewind(entry);
                Outcome::Mismatch
            }
            Outcome::Fatal(failure) => Outcome::Fatal(failure),
        }
    }

    fn describe(&self) -> String {
        let body = self.body.describe();
        match (self.min, self.max) {
            (0, None) => format!("zero or more {body}"),
            (1, None) => format!("one or more {body}"),
            (min, None) => format!("at least {min} {body}"),
            (min, Some(max)) => format!("{min} to {max} {body}"),
        }
    }
}

/// One or more `item`s separated by `sep`. See [`list`].
#[derive(Clone, Copy, Debug)]
pub struct List<P, S> {
    item: P,
    sep: S,
}

/// A separated list: `item (sep item)*`. The separator's output is
/// discarded; a trailing separator is left unconsumed.
pub fn list<P: Parser, S: Parser>(item: P, sep: S) -> List<P, S> {
    List { item, sep }
}

impl<P: Parser, S: Parser> Parser for List<P, S> {
    type Output = Vec<P::Output>;

    fn parse(&self, scan: &mut Scan<'_>, ctx: &Context<'_>) -> Outcome<Vec<P::Output>> {
        let entry = scan.checkpoint();
        let mut items = Vec::new();

        match self.item.parse_repeated(scan, ctx, &mut items) {
            Outcome::Matched(()) => {}
            Outcome::Mismatch => {
                if has_expectation_failure(ctx) {
                    return Outcome::Mismatch;
                }
                scan.rewind(entry);
                return Outcome::Mismatch;
            }
            Outcome::Fatal(failure) => return Outcome::Fatal(failure),
        }

        loop {
            let before_sep = scan.checkpoint();
            match self.sep.parse(scan, ctx) {
                Outcome::Matched(_) => {}
                Outcome::Mismatch => {
                    if has_expectation_failure(ctx) {
                        return Outcome::Mismatch;
                    }
                    scan.rewind(before_sep);
                    break;
                }
                Outcome::Fatal(failure) => return Outcome::Fatal(failure),
            }
            match self.item.parse_repeated(scan, ctx, &mut items) {
                Outcome::Matched(()) => {}
                Outcome::Mismatch => {
                    if has_expectation_failure(ctx) {
                        return Outcome::Mismatch;
                    }
                    // The separator matched but no item followed; the
                    // separator is not part of the list.
                    scan.rewind(before_sep);
                    break;
                }
                Outcome::Fatal(failure) => return Outcome::Fatal(failure),
            }
        }

        Outcome::Matched(items)
    }

    fn describe(&self) -> String {
        format!(
            "{} separated by {}",
            self.item.describe(),
            self.sep.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{list, one_or_more, repeat, zero_or_more};
    use crate::combinator::{lit, text};
    use crate::{parse, Outcome, Parser, Scan};

    #[test]
    fn zero_or_more_accepts_nothing() {
        let parser = zero_or_more(lit('a'));
        let mut scan = Scan::new("b");
        assert_eq!(parse(&mut scan, &parser), Outcome::Matched(vec![]));
        assert_eq!(scan.offset(), 0);
    }

    #[test]
    fn zero_or_more_collects_every_match() {
        let parser = zero_or_more(lit('a'));
        let mut scan = Scan::new("aaab");
        assert_eq!(
            parse(&mut scan, &parser),
            Outcome::Matched(vec!['a', 'a', 'a'])
        );
        assert_eq!(scan.offset(), 3);
    }

    #[test]
    fn one_or_more_requires_a_first_match() {
        let parser = one_or_more(lit('a'));
        let mut scan = Scan::new("b");
        assert_eq!(parse(&mut scan, &parser), Outcome::Mismatch);
        assert_eq!(scan.offset(), 0);
    }

    #[test]
    fn repeat_stops_at_the_upper_bound() {
        let parser = repeat(lit('a'), 1, 2);
        let mut scan = Scan::new("aaa");
        assert_eq!(parse(&mut scan, &parser), Outcome::Matched(vec!['a', 'a']));
        assert_eq!(scan.offset(), 2);
    }

    #[test]
    fn repeat_mismatches_below_the_lower_bound() {
        let parser = repeat(lit('a'), 2, 3);
        let mut scan = Scan::new("ab");
        assert_eq!(parse(&mut scan, &parser), Outcome::Mismatch);
        assert_eq!(scan.offset(), 0);
    }

    #[test]
    fn partial_iteration_rolls_back_before_stopping() {
        // Second iteration matches 'a' then fails on 'b'; the repetition
        // must end right after the first element.
        let parser = zero_or_more(lit('a').then(lit('b'))).then(text("ac"));
        let mut scan = Scan::new("abac");
        assert_eq!(
            parse(&mut scan, &parser),
            Outcome::Matched((vec![('a', 'b')], "ac"))
        );
        assert!(scan.is_at_end());
    }

    #[test]
    fn list_collects_separated_items() {
        let parser = list(lit('a'), lit(','));
        let mut scan = Scan::new("a,a,a");
        assert_eq!(
            parse(&mut scan, &parser),
            Outcome::Matched(vec!['a', 'a', 'a'])
        );
        assert!(scan.is_at_end());
    }

    #[test]
    fn list_leaves_a_trailing_separator() {
        let parser = list(lit('a'), lit(','));
        let mut scan = Scan::new("a,a,b");
        assert_eq!(parse(&mut scan, &parser), Outcome::Matched(vec!['a', 'a']));
        assert_eq!(scan.offset(), 3);
    }

    #[test]
    fn list_requires_one_item() {
        let parser = list(lit('a'), lit(','));
        let mut scan = Scan::new(",a");
        assert_eq!(parse(&mut scan, &parser), Outcome::Mismatch);
        assert_eq!(scan.offset(), 0);
    }
}
