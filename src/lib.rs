//! # ScanComb - Character Scanning Combinators
//!
//! A small engine for hand-written recursive-descent parsers over borrowed text.
//!
//! Parsing happens by threading an immutable cursor through chained primitive
//! operations. Every primitive returns a new cursor; the old one stays valid, so
//! backtracking is just keeping a copy around. The library emphasizes:
//!
//! - **Zero copy**: Captured text is a sub-slice of the input
//! - **Two failure policies**: Fail-fast [`TextCursor`] threads `Result` with `?`,
//!   accumulating [`ContextCursor`] records the first failure and keeps scanning
//! - **Lazy positions**: Failures carry only the remaining length; line and column
//!   are recovered from the source text when the error is displayed
//!
//! ```
//! use scancomb::{Cursor, try_parse};
//!
//! let value = try_parse("  42", |cursor| {
//!     let (digits, cursor) = cursor
//!         .skip_while(char::is_whitespace)
//!         .take_while(|c: char| c.is_ascii_digit());
//!     let cursor = cursor.assert(!digits.is_empty(), "Expected digits")?;
//!     Ok((digits, cursor))
//! });
//! assert_eq!(value.unwrap(), "42");
//! ```

pub mod cursor;
pub mod cursors;
pub mod error;
pub mod many;
pub mod parse;
pub mod predicate;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "xml")]
pub mod xml;

pub use cursor::{Cursor, NUL};
pub use cursors::{ContextCursor, TextCursor};
pub use error::{Failure, Location, ParseError, locate};
pub use many::{take_many, try_take_many};
pub use parse::{try_parse, try_parse_collecting};
pub use predicate::{CharPredicate, CharPredicateExt, any, not, one_of};
