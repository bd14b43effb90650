use crate::cursor::Cursor;
use crate::error::Failure;
use std::borrow::Cow;
use std::fmt;

/// Fail-fast cursor over borrowed text
///
/// Required conditions are checked with [`TextCursor::assert`], which turns a
/// false condition into a [`Failure`] right away. Grammars thread the result
/// with `?`, so the first failure unwinds the whole parse up to
/// [`crate::try_parse`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextCursor<'code> {
    buffer: &'code str,
}

impl<'code> TextCursor<'code> {
    pub fn new(text: &'code str) -> Self {
        TextCursor { buffer: text }
    }

    /// Fail with `expected` unless `condition` holds
    #[inline]
    pub fn assert(
        self,
        condition: bool,
        expected: impl Into<Cow<'static, str>>,
    ) -> Result<Self, Failure> {
        if condition {
            Ok(self)
        } else {
            Err(self.fail(expected))
        }
    }

    /// Build a failure at the current position
    #[inline]
    pub fn fail(&self, expected: impl Into<Cow<'static, str>>) -> Failure {
        Failure::new(expected, self.remaining())
    }

    /// Skip `c`, failing with "Expected 'c'" if it is not next
    pub fn expect_char(self, c: char) -> Result<Self, Failure> {
        match self.skip_char(c) {
            (cursor, true) => Ok(cursor),
            (cursor, false) => Err(cursor.fail(format!("Expected '{}'", c))),
        }
    }

    /// Skip `text`, failing with `expected` if the input does not start with it
    pub fn expect_literal(
        self,
        text: &str,
        expected: impl Into<Cow<'static, str>>,
    ) -> Result<Self, Failure> {
        let (cursor, matched) = self.skip_literal(text);
        cursor.assert(matched, expected)
    }
}

impl<'code> Cursor<'code> for TextCursor<'code> {
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
        TextCursor {
            buffer: &self.buffer[n..],
        }
    }
}

impl<'code> From<&'code str> for TextCursor<'code> {
    fn from(text: &'code str) -> Self {
        TextCursor::new(text)
    }
}

impl fmt::Display for TextCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let cursor = TextCursor::from("abc");
        assert_eq!(cursor.remaining(), 3);
        assert!(!cursor.is_at_end());
        assert_eq!(cursor.to_string(), "abc");
    }

    #[test]
    fn test_empty() {
        let cursor = TextCursor::new("");
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_assert_holds() {
        let cursor = TextCursor::new("abc");
        let cursor = cursor.assert(true, "never").unwrap();
        assert_eq!(cursor.buffer(), "abc");
    }

    #[test]
    fn test_assert_fails_with_remaining() {
        let cursor = TextCursor::new("abc").skip_one();
        let failure = cursor.assert(false, "Expected digit").unwrap_err();
        assert_eq!(failure.expected(), "Expected digit");
        assert_eq!(failure.remaining(), 2);
    }

    #[test]
    fn test_fail() {
        let cursor = TextCursor::new("xyz");
        let failure = cursor.fail(format!("Expected end tag </{}>", "li"));
        assert_eq!(failure, Failure::new("Expected end tag </li>", 3));
    }

    #[test]
    fn test_expect_char() {
        let cursor = TextCursor::new("{}").expect_char('{').unwrap();
        assert_eq!(cursor.buffer(), "}");

        let failure = cursor.expect_char(']').unwrap_err();
        assert_eq!(failure.expected(), "Expected ']'");
        assert_eq!(failure.remaining(), 1);
    }

    #[test]
    fn test_expect_literal() {
        let cursor = TextCursor::new("</li>")
            .expect_literal("</", "Expected end tag")
            .unwrap();
        assert_eq!(cursor.buffer(), "li>");

        let failure = cursor.expect_literal("</", "Expected end tag").unwrap_err();
        assert_eq!(failure.remaining(), 3);
    }

    #[test]
    #[should_panic]
    fn test_advance_inside_character_panics() {
        let _ = TextCursor::new("中").advance(2);
    }

    #[test]
    fn test_copy_independence() {
        let cursor = TextCursor::new("abcd");

        // Make copies before advancing
        let saved_at_a = cursor;
        let cursor = cursor.skip_one();
        assert_eq!(cursor.peek_one(), 'b');
        assert_eq!(saved_at_a.peek_one(), 'a');

        // Saved copies create new paths
        let from_a = saved_at_a.skip_one().skip_one();
        assert_eq!(from_a.peek_one(), 'c');
        assert_eq!(cursor.peek_one(), 'b');
    }

    #[test]
    fn test_fail_fast_chain() {
        fn key_value(cursor: TextCursor<'_>) -> Result<((&str, &str), TextCursor<'_>), Failure> {
            let (key, cursor) = cursor.take_while(char::is_alphanumeric);
            let cursor = cursor.assert(!key.is_empty(), "Expected key")?;
            let cursor = cursor.skip_while(char::is_whitespace).expect_char('=')?;
            let (value, cursor) = cursor
                .skip_while(char::is_whitespace)
                .take_while(char::is_alphanumeric);
            Ok(((key, value), cursor))
        }

        let ((key, value), _) = key_value(TextCursor::new("name = sprog")).unwrap();
        assert_eq!((key, value), ("name", "sprog"));

        let failure = key_value(TextCursor::new("name : sprog")).unwrap_err();
        assert_eq!(failure.expected(), "Expected '='");
        assert_eq!(failure.remaining(), "name : sprog".len() - 5);
    }
}
