use crate::many;
use crate::predicate::{CharPredicate, any, not};

/// Sentinel returned by single character takes and peeks that found nothing
pub const NUL: char = '\0';

/// Advance over `buffer` while `predicate` holds, taking at most `max`
/// characters
///
/// Returns the byte length of the matched prefix, always on a char boundary.
/// Every take, skip and peek primitive is a specialisation of this loop.
#[inline]
pub(crate) fn match_while<P>(buffer: &str, predicate: &P, max: usize) -> usize
where
    P: CharPredicate + ?Sized,
{
    let mut end = 0;
    for (taken, c) in buffer.chars().enumerate() {
        if taken >= max || !predicate.matches(c) {
            break;
        }
        end += c.len_utf8();
    }
    end
}

/// Immutable view over the remaining input of a parse
///
/// A cursor never grows: every operation consumes the cursor and hands back
/// a new one whose buffer is a suffix of the old buffer (or the same buffer,
/// for operations that match nothing). Implementors only provide access to
/// the buffer and a way to drop a prefix of it; all scanning is shared.
///
/// Operations that extract a value return it first, followed by the advanced
/// cursor, mirroring how combinators thread `(value, cursor)` pairs.
pub trait Cursor<'code>: Clone + Sized {
    /// The remaining, unconsumed input
    fn buffer(&self) -> &'code str;

    /// Drop the first `n` bytes of the buffer
    ///
    /// `n` must lie on a char boundary; the provided methods only ever pass
    /// lengths produced by [`match_while`]. Panics otherwise.
    fn advance(self, n: usize) -> Self;

    /// Number of bytes left in the input
    #[inline]
    fn remaining(&self) -> usize {
        self.buffer().len()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.buffer().is_empty()
    }

    /// Take one character if it satisfies `predicate`
    ///
    /// On no match (or at end of input) returns [`NUL`] and the unchanged
    /// cursor. Callers must check the result explicitly.
    #[inline]
    fn take_one<P: CharPredicate>(self, predicate: P) -> (char, Self) {
        let n = match_while(self.buffer(), &predicate, 1);
        let matched = self.buffer()[..n].chars().next().unwrap_or(NUL);
        (matched, self.advance(n))
    }

    /// Take one character, whatever it is
    #[inline]
    fn take_any(self) -> (char, Self) {
        self.take_one(any())
    }

    /// Take the longest prefix whose characters satisfy `predicate`
    ///
    /// The match may be empty. Nothing is copied; the returned slice borrows
    /// from the original input.
    #[inline]
    fn take_while<P: CharPredicate>(self, predicate: P) -> (&'code str, Self) {
        self.take_while_bounded(predicate, usize::MAX)
    }

    /// As [`Cursor::take_while`] but stops after at most `max` characters
    #[inline]
    fn take_while_bounded<P: CharPredicate>(self, predicate: P, max: usize) -> (&'code str, Self) {
        let buffer = self.buffer();
        let n = match_while(buffer, &predicate, max);
        (&buffer[..n], self.advance(n))
    }

    /// The next `count` characters without advancing, or `None` if fewer
    /// remain
    #[inline]
    fn peek(&self, count: usize) -> Option<&'code str> {
        let buffer = self.buffer();
        let n = match_while(buffer, &any(), count);
        let complete = n < buffer.len() || buffer.chars().count() == count;
        complete.then(|| &buffer[..n])
    }

    /// The next character without advancing, or [`NUL`] at end of input
    ///
    /// Use [`Cursor::is_at_end`] where a real NUL in the input matters.
    #[inline]
    fn peek_one(&self) -> char {
        self.buffer().chars().next().unwrap_or(NUL)
    }

    /// Skip every leading character satisfying `predicate`
    #[inline]
    fn skip_while<P: CharPredicate>(self, predicate: P) -> Self {
        let n = match_while(self.buffer(), &predicate, usize::MAX);
        self.advance(n)
    }

    /// Skip up to, but not including, the first character satisfying
    /// `predicate`
    #[inline]
    fn skip_until<P: CharPredicate>(self, predicate: P) -> Self {
        self.skip_while(not(predicate))
    }

    /// Skip one character, whatever it is; a no-op at end of input
    #[inline]
    fn skip_one(self) -> Self {
        self.skip_one_if(any())
    }

    /// Skip one character if it satisfies `predicate`
    #[inline]
    fn skip_one_if<P: CharPredicate>(self, predicate: P) -> Self {
        let n = match_while(self.buffer(), &predicate, 1);
        self.advance(n)
    }

    /// Skip `c` if it is the next character, reporting whether it was
    #[inline]
    fn skip_char(self, c: char) -> (Self, bool) {
        let n = match_while(self.buffer(), &c, 1);
        (self.advance(n), n > 0)
    }

    /// Skip `text` if the input starts with it exactly
    ///
    /// Atomic: on a mismatch nothing is consumed, however long the common
    /// prefix was.
    #[inline]
    fn skip_literal(self, text: &str) -> (Self, bool) {
        if self.starts_with(text) {
            (self.advance(text.len()), true)
        } else {
            (self, false)
        }
    }

    /// Whether the input starts with `text`
    #[inline]
    fn starts_with(&self, text: &str) -> bool {
        self.buffer().starts_with(text)
    }

    /// Whether the next character satisfies `predicate`
    #[inline]
    fn next_is<P: CharPredicate>(&self, predicate: P) -> bool {
        match_while(self.buffer(), &predicate, 1) > 0
    }

    /// Name a value produced earlier in a chain without touching the buffer
    #[inline(always)]
    fn bind<T>(self, value: T) -> (T, Self) {
        (value, self)
    }

    /// Split off a copy of the cursor to resume from later
    ///
    /// Used to try one branch and fall back to the position before it.
    #[inline(always)]
    fn fork(self) -> (Self, Self) {
        (self.clone(), self)
    }

    /// Finish a chain with a value instead of a cursor
    #[inline(always)]
    fn map_result<T>(self, value: T) -> T {
        value
    }

    /// Repeat `item` until it reports no match, collecting the matches
    ///
    /// See [`many::take_many`].
    fn take_many<T, F>(self, item: F) -> (Vec<T>, Self)
    where
        F: FnMut(Self) -> (Option<T>, Self),
    {
        many::take_many(self, item)
    }

    /// As [`Cursor::take_many`] for item parsers that can fail outright
    ///
    /// See [`many::try_take_many`].
    fn try_take_many<T, E, F>(self, item: F) -> Result<(Vec<T>, Self), E>
    where
        F: FnMut(Self) -> Result<(Option<T>, Self), E>,
    {
        many::try_take_many(self, item)
    }
}
