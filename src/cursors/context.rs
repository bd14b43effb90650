use crate::cursor::Cursor;
use crate::error::Failure;
use log::trace;
use std::borrow::Cow;
use std::fmt;

/// Accumulating cursor over borrowed text
///
/// Carries a sticky error slot alongside the buffer. [`ContextCursor::assert`]
/// never aborts: a false condition records a [`Failure`] in the slot and
/// scanning continues as usual. Only the first failure is kept, so the
/// earliest and most specific cause survives whatever the grammar runs into
/// afterwards. Grammars check [`ContextCursor::has_error`] at their decision
/// points before trusting captured values.
///
/// Optional matches that miss (`skip_char`, `skip_literal`, `take_one`, ...)
/// never touch the slot; only assertions do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCursor<'code> {
    buffer: &'code str,
    error: Option<Failure>,
}

impl<'code> ContextCursor<'code> {
    pub fn new(text: &'code str) -> Self {
        ContextCursor {
            buffer: text,
            error: None,
        }
    }

    /// Record `expected` as a failure unless `condition` holds
    ///
    /// The slot is only written if it is still empty.
    pub fn assert(mut self, condition: bool, expected: impl Into<Cow<'static, str>>) -> Self {
        if condition {
            return self;
        }

        let failure = Failure::new(expected, self.remaining());
        match &self.error {
            None => {
                trace!(
                    "recording failure '{}' with {} bytes remaining",
                    failure.expected(),
                    failure.remaining()
                );
                self.error = Some(failure);
            }
            Some(first) => {
                trace!(
                    "suppressing failure '{}', already failed with '{}'",
                    failure.expected(),
                    first.expected()
                );
            }
        }
        self
    }

    /// As [`ContextCursor::assert`], building the message only on failure
    pub fn assert_with<M, F>(self, condition: bool, expected: F) -> Self
    where
        M: Into<Cow<'static, str>>,
        F: FnOnce() -> M,
    {
        if condition {
            self
        } else {
            self.assert(false, expected())
        }
    }

    /// Skip `c`, recording "Expected 'c'" if it is not next
    pub fn expect_char(self, c: char) -> Self {
        let (cursor, matched) = self.skip_char(c);
        if matched {
            cursor
        } else {
            cursor.assert(false, format!("Expected '{}'", c))
        }
    }

    /// Skip `text`, recording `expected` if the input does not start with it
    pub fn expect_literal(self, text: &str, expected: impl Into<Cow<'static, str>>) -> Self {
        let (cursor, matched) = self.skip_literal(text);
        cursor.assert(matched, expected)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The first recorded failure, if any
    pub fn error(&self) -> Option<&Failure> {
        self.error.as_ref()
    }

    /// Inspect the slot mid-chain without ending it
    pub fn check_error(self) -> (Option<Failure>, Self) {
        (self.error.clone(), self)
    }

    /// Consume the cursor, keeping only the recorded failure
    pub fn into_error(self) -> Option<Failure> {
        self.error
    }
}

impl<'code> Cursor<'code> for ContextCursor<'code> {
    #[inline]
    fn buffer(&self) -> &'code str {
        self.buffer
    }

    #[inline]
    fn advance(self, n: usize) -> Self {
        debug_assert!(
            self.buffer.is_char_boundary(n),
            "advance by {} bytes splits a character",
            n
        );
        ContextCursor {
            buffer: &self.buffer[n..],
            error: self.error,
        }
    }
}

impl<'code> From<&'code str> for ContextCursor<'code> {
    fn from(text: &'code str) -> Self {
        ContextCursor::new(text)
    }
}

impl fmt::Display for ContextCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_error() {
        let cursor = ContextCursor::new("abc");
        assert!(!cursor.has_error());
        assert_eq!(cursor.error(), None);
        assert_eq!(cursor.to_string(), "abc");
    }

    #[test]
    fn test_assert_holds() {
        let cursor = ContextCursor::new("abc").assert(true, "never");
        assert!(!cursor.has_error());
    }

    #[test]
    fn test_assert_records_and_continues() {
        let cursor = ContextCursor::new("abc")
            .skip_one()
            .assert(false, "Expected digit")
            .skip_one();

        // Scanning carried on after the failure
        assert_eq!(cursor.buffer(), "c");
        let error = cursor.error().unwrap();
        assert_eq!(error.expected(), "Expected digit");
        assert_eq!(error.remaining(), 2);
    }

    #[test]
    fn test_first_failure_sticks() {
        let cursor = ContextCursor::new("abc")
            .assert(false, "first")
            .skip_one()
            .assert(false, "second")
            .expect_char('z');

        let error = cursor.into_error().unwrap();
        assert_eq!(error.expected(), "first");
        assert_eq!(error.remaining(), 3);
    }

    #[test]
    fn test_optional_misses_never_set_error() {
        let cursor = ContextCursor::new("abc");
        let (cursor, matched) = cursor.skip_literal("xyz");
        assert!(!matched);
        let (cursor, matched) = cursor.skip_char('x');
        assert!(!matched);
        let (c, cursor) = cursor.take_one(char::is_numeric);
        assert_eq!(c, crate::cursor::NUL);
        let cursor = cursor.skip_one_if('x');
        assert!(!cursor.has_error());
    }

    #[test]
    fn test_expect_char() {
        let cursor = ContextCursor::new("<a>").expect_char('<');
        assert_eq!(cursor.buffer(), "a>");
        assert!(!cursor.has_error());

        let cursor = cursor.expect_char('>');
        assert_eq!(cursor.buffer(), "a>");
        assert_eq!(cursor.error().unwrap().expected(), "Expected '>'");
    }

    #[test]
    fn test_expect_literal() {
        let cursor = ContextCursor::new("</a>").expect_literal("</", "Expected end tag");
        assert_eq!(cursor.buffer(), "a>");
        assert!(!cursor.has_error());

        let cursor = cursor.expect_literal("</", "Expected end tag");
        assert_eq!(cursor.error().unwrap().remaining(), 2);
    }

    #[test]
    fn test_assert_with_builds_message_only_on_failure() {
        let built = std::cell::Cell::new(0);
        let message = || {
            built.set(built.get() + 1);
            format!("Expected end tag </{}>", "li")
        };

        let cursor = ContextCursor::new("li>").assert_with(true, message);
        assert_eq!(built.get(), 0);
        assert!(!cursor.has_error());

        let cursor = cursor.assert_with(false, message);
        assert_eq!(built.get(), 1);
        assert_eq!(cursor.error().unwrap().expected(), "Expected end tag </li>");
    }

    #[test]
    #[should_panic]
    fn test_advance_inside_character_panics() {
        let _ = ContextCursor::new("éa").advance(1);
    }

    #[test]
    fn test_check_error_mid_chain() {
        let (error, cursor) = ContextCursor::new("ab").assert(false, "oops").check_error();
        assert_eq!(error.map(|e| e.remaining()), Some(2));

        // The chain keeps going with the error still attached
        let cursor = cursor.skip_one();
        assert!(cursor.has_error());
    }

    #[test]
    fn test_fork_carries_error() {
        let cursor = ContextCursor::new("ab").assert(false, "oops");
        let (saved, cursor) = cursor.fork();
        assert!(saved.has_error());
        assert!(cursor.skip_one().has_error());
    }
}
