//! Input cursor for the heddle combinator library.
//!
//! Provides [`Scan`], a character-level cursor over a borrowed `&str`, and
//! [`Checkpoint`], a lightweight save point for backtracking. Parsers consume
//! input exclusively through a `&mut Scan`; failed attempts roll the cursor
//! back by restoring a previously taken checkpoint.

use tracing::trace;

/// A save point into a [`Scan`].
///
/// Checkpoints are cheap `Copy` values ordered by input progress. A checkpoint
/// taken from one scan must only be restored into that same scan; restoring it
/// anywhere else is a logic error caught by debug assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Byte offset this checkpoint refers to.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }
}

/// Cursor over borrowed input.
///
/// Tracks a byte offset into the source, always on a UTF-8 character
/// boundary. The cursor only moves forward through [`Scan::bump`] and the
/// `eat` helpers; [`Scan::rewind`] is the single way to move it back.
#[derive(Debug)]
pub struct Scan<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scan<'a> {
    /// Create a cursor at the start of `src`.
    pub const fn new(src: &'a str) -> Self {
        Scan { src, pos: 0 }
    }

    /// Current byte offset into the source.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// The full source this cursor scans.
    #[inline]
    pub const fn source(&self) -> &'a str {
        self.src
    }

    /// The not-yet-consumed tail of the source.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Check if all input has been consumed.
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.pos == self.src.len()
    }

    /// Take a checkpoint at the current position.
    #[inline]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Restore a previously taken checkpoint.
    ///
    /// # Panics
    ///
    /// Debug builds panic when the checkpoint does not lie on a character
    /// boundary of this scan's source, which indicates it was taken from a
    /// different scan.
    #[inline]
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        debug_assert!(
            self.src.is_char_boundary(checkpoint.0),
            "checkpoint {} is not a char boundary of this input",
            checkpoint.0
        );
        if checkpoint.0 != self.pos {
            trace!(from = self.pos, to = checkpoint.0, "rewind");
        }
        self.pos = checkpoint.0;
    }

    /// Look at the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    ///
    /// Returns `None` at end of input without moving the cursor.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        trace!(pos = self.pos, ch = %ch, "bump");
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume the next character if it equals `expected`.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `expected` if the remaining input starts with it.
    #[inline]
    pub fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }
}
