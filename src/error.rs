use crate::cursor::Cursor;
use crate::cursors::TextCursor;
use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use thiserror::Error;

/// A required condition that did not hold while scanning
///
/// Only the number of bytes left unconsumed is captured at the point of
/// failure. Turning that into a line and column needs the original text and
/// is left to [`ParseError`], so the success path never pays for position
/// tracking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{expected}")]
pub struct Failure {
    expected: Cow<'static, str>,
    remaining: usize,
}

impl Failure {
    pub fn new(expected: impl Into<Cow<'static, str>>, remaining: usize) -> Self {
        Self {
            expected: expected.into(),
            remaining,
        }
    }

    /// Human readable description of what was required
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Bytes left in the input when the failure was raised
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

/// 1-based line and column of a failure
///
/// The column counts characters, not bytes, from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// Recover the line and column of a failure from the full text
///
/// Walks `text` one line at a time from the start until the line containing
/// the point `remaining` bytes before the end is found.
///
/// Every newline before the point starts a new line, so end of input directly
/// after a trailing newline is reported as column 1 of the following (empty)
/// line, never as one past the end of the last non-empty line:
/// `locate("hello\n", 0)` is `(2, 1)`, not `(1, 7)`.
pub fn locate(text: &str, remaining: usize) -> Location {
    let remaining = remaining.min(text.len());
    let index = text.len() - remaining;

    let mut line = TextCursor::new(text);
    let mut number = 1;

    loop {
        let end_of_line = line.skip_until('\n');
        if remaining >= end_of_line.remaining() {
            break;
        }
        line = end_of_line.skip_one();
        number += 1;
    }

    let line_start = text.len() - line.remaining();
    let column = text
        .get(line_start..index)
        .map_or(index - line_start, |prefix| prefix.chars().count());

    Location {
        line: number,
        column: column + 1,
    }
}

/// A failure tied back to the text it was raised against
///
/// The location is computed at most once, the first time it is asked for
/// (directly or by displaying the error).
#[derive(Debug, Clone)]
pub struct ParseError<'code> {
    failure: Failure,
    source: Option<&'code str>,
    location: OnceCell<Location>,
}

impl<'code> ParseError<'code> {
    pub fn new(failure: Failure) -> Self {
        Self {
            failure,
            source: None,
            location: OnceCell::new(),
        }
    }

    /// Attach the original full text the failure was raised against
    pub fn with_source(mut self, source: &'code str) -> Self {
        self.source = Some(source);
        self.location = OnceCell::new();
        self
    }

    pub fn expected(&self) -> &str {
        self.failure.expected()
    }

    pub fn remaining(&self) -> usize {
        self.failure.remaining()
    }

    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    pub fn source_text(&self) -> Option<&'code str> {
        self.source
    }

    /// Whether the location has already been computed
    pub fn is_located(&self) -> bool {
        self.location.get().is_some()
    }

    /// Line and column of the failure, or `None` without source text
    pub fn location(&self) -> Option<Location> {
        let source = self.source?;
        Some(
            *self
                .location
                .get_or_init(|| locate(source, self.failure.remaining())),
        )
    }

    /// Lines of source around the failure
    ///
    /// Returns up to 2 lines before and after the failing line, the failing
    /// line marked with `>` and followed by a pointer at the failing column.
    pub fn context_lines(&self) -> Vec<String> {
        let (Some(source), Some(location)) = (self.source, self.location()) else {
            return Vec::new();
        };

        let first = location.line.saturating_sub(2).max(1);
        let last = location.line + 2;
        let mut lines = Vec::new();

        // `split('\n')` keeps the empty line after a trailing newline, which
        // is where a failure at end of input directly after it is located.
        for (number, content) in source.split('\n').enumerate().map(|(i, l)| (i + 1, l)) {
            if number < first {
                continue;
            }
            if number > last {
                break;
            }

            let content = content.strip_suffix('\r').unwrap_or(content);
            if number == location.line {
                let prefix = format!("  > {} | ", number);
                lines.push(format!("{}{}", prefix, content));
                let pointer_offset = prefix.len() + location.column - 1;
                lines.push(format!("{}^--- here", " ".repeat(pointer_offset)));
            } else {
                lines.push(format!("    {} | {}", number, content));
            }
        }

        lines
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(location) => write!(f, "{} {}", location, self.failure.expected()),
            None => write!(f, "{}", self.failure.expected()),
        }
    }
}

impl std::error::Error for ParseError<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.failure)
    }
}

impl From<Failure> for ParseError<'_> {
    fn from(failure: Failure) -> Self {
        ParseError::new(failure)
    }
}
