use crate::cursor::Cursor;
use crate::cursors::{ContextCursor, TextCursor};
use crate::error::{Failure, ParseError};
use log::{debug, trace};

/// Run a fail-fast grammar over `text`
///
/// `root` receives a cursor over the whole text and either returns the
/// parsed value with the cursor it stopped at, or the first [`Failure`] it
/// ran into. The failure is turned into a [`ParseError`] tied to `text`, so
/// its line and column can be recovered when it is reported.
///
/// Skipping leading whitespace and requiring that all input is consumed are
/// left to the grammar.
pub fn try_parse<'code, T, F>(text: &'code str, root: F) -> Result<T, ParseError<'code>>
where
    F: FnOnce(TextCursor<'code>) -> Result<(T, TextCursor<'code>), Failure>,
{
    match root(TextCursor::new(text)) {
        Ok((value, rest)) => {
            trace!(
                "parsed {} of {} bytes",
                text.len() - rest.remaining(),
                text.len()
            );
            Ok(value)
        }
        Err(failure) => Err(reject(text, failure)),
    }
}

/// Run an accumulating grammar over `text`
///
/// `root` always runs to completion; afterwards the error slot of the cursor
/// it returns decides the outcome. The produced value is discarded when a
/// failure was recorded.
pub fn try_parse_collecting<'code, T, F>(text: &'code str, root: F) -> Result<T, ParseError<'code>>
where
    F: FnOnce(ContextCursor<'code>) -> (T, ContextCursor<'code>),
{
    let (value, rest) = root(ContextCursor::new(text));
    let consumed = text.len() - rest.remaining();

    match rest.into_error() {
        None => {
            trace!("parsed {} of {} bytes", consumed, text.len());
            Ok(value)
        }
        Some(failure) => Err(reject(text, failure)),
    }
}

fn reject(text: &str, failure: Failure) -> ParseError<'_> {
    debug!(
        "parse failed with {} of {} bytes remaining: {}",
        failure.remaining(),
        text.len(),
        failure.expected()
    );
    ParseError::new(failure).with_source(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Location;
    use crate::predicate::CharPredicateExt;

    fn digits(cursor: TextCursor<'_>) -> Result<(u64, TextCursor<'_>), Failure> {
        let (text, cursor) = cursor.take_while(|c: char| c.is_ascii_digit());
        let cursor = cursor.assert(!text.is_empty(), "Expected digits")?;
        let value = text.parse().map_err(|_| cursor.fail("Number too large"))?;
        Ok((value, cursor))
    }

    #[test]
    fn test_try_parse_success() {
        let value = try_parse("1234", digits).unwrap();
        assert_eq!(value, 1234);
    }

    #[test]
    fn test_try_parse_does_not_require_full_consumption() {
        let value = try_parse("12ab", digits).unwrap();
        assert_eq!(value, 12);
    }

    #[test]
    fn test_try_parse_failure_is_located() {
        let error = try_parse("\n\n  x", |cursor| {
            digits(cursor.skip_while(char::is_whitespace))
        })
        .unwrap_err();

        assert_eq!(error.expected(), "Expected digits");
        assert_eq!(error.remaining(), 1);
        assert!(!error.is_located());
        assert_eq!(error.location(), Some(Location { line: 3, column: 3 }));
        assert_eq!(error.to_string(), "(3, 3) Expected digits");
    }

    #[test]
    fn test_try_parse_empty_input() {
        let error = try_parse("", digits).unwrap_err();
        assert_eq!(error.to_string(), "(1, 1) Expected digits");
    }

    #[test]
    fn test_try_parse_collecting_success() {
        let value = try_parse_collecting("ab", |cursor| {
            let (word, cursor) = cursor.take_while(char::is_alphabetic);
            let at_end = cursor.is_at_end();
            (word.to_owned(), cursor.assert(at_end, "Expected end of input"))
        })
        .unwrap();
        assert_eq!(value, "ab");
    }

    #[test]
    fn test_try_parse_collecting_reports_first_failure() {
        let error = try_parse_collecting("a\nb!c", |cursor| {
            let cursor = cursor
                .skip_while(char::is_alphanumeric.or('\n'))
                .expect_char(';')
                .skip_one()
                .expect_char(';');
            ((), cursor)
        })
        .unwrap_err();

        assert_eq!(error.expected(), "Expected ';'");
        assert_eq!(error.location(), Some(Location { line: 2, column: 2 }));
    }
}
