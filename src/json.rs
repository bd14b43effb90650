//! JSON grammar on the fail-fast [`TextCursor`]
//!
//! A recursive-descent reader for objects, arrays, strings (with standard
//! escapes), numbers and the `true`/`false`/`null` literals, plus a compact
//! renderer whose output parses back to an equal value.

use crate::cursor::{Cursor, NUL};
use crate::cursors::TextCursor;
use crate::error::{Failure, ParseError};
use crate::parse;
use crate::predicate::one_of;
use std::fmt;
use std::fmt::Write;

const NUMBER_CHARS: &str = "0123456789.eE+-";

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    /// Properties in document order; duplicate keys are kept
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// First property named `key`, if this is an object
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(properties) => properties
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(value) => write!(f, "{}", value),
            // Non-finite numbers have no JSON spelling
            JsonValue::Number(value) if !value.is_finite() => f.write_str("null"),
            JsonValue::Number(value) => write!(f, "{}", value),
            JsonValue::String(value) => write_escaped(f, value),
            JsonValue::Array(values) => {
                f.write_char('[')?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_char(']')
            }
            JsonValue::Object(properties) => {
                f.write_char('{')?;
                for (i, (name, value)) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_escaped(f, name)?;
                    write!(f, ":{}", value)?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Parse a whole JSON document
///
/// Leading and trailing whitespace is allowed; anything else after the root
/// value is an error.
pub fn try_parse(text: &str) -> Result<JsonValue, ParseError<'_>> {
    parse::try_parse(text, |cursor| {
        let (value, cursor) = parse_value(cursor.skip_while(char::is_whitespace))?;
        let cursor = cursor.skip_while(char::is_whitespace);
        let at_end = cursor.is_at_end();
        Ok((value, cursor.assert(at_end, "Expected end of input")?))
    })
}

/// Parse one JSON value at the cursor
pub fn parse_value(cursor: TextCursor<'_>) -> Result<(JsonValue, TextCursor<'_>), Failure> {
    match cursor.peek_one() {
        '{' => parse_object(cursor.skip_one()),
        '[' => parse_array(cursor.skip_one()),
        '"' => {
            let (value, cursor) = parse_string(cursor)?;
            Ok((JsonValue::String(value), cursor))
        }
        _ => {
            if let (cursor, true) = cursor.skip_literal("null") {
                Ok((JsonValue::Null, cursor))
            } else if let (cursor, true) = cursor.skip_literal("true") {
                Ok((JsonValue::Bool(true), cursor))
            } else if let (cursor, true) = cursor.skip_literal("false") {
                Ok((JsonValue::Bool(false), cursor))
            } else {
                let (value, cursor) = parse_number(cursor)?;
                Ok((JsonValue::Number(value), cursor))
            }
        }
    }
}

/// Number in strict JSON shape, within the range of `f64`
///
/// The whole run of number-like characters is taken first, so `01`, `+1`,
/// `.5` and `1.` are reported as malformed at their first character.
fn parse_number(cursor: TextCursor<'_>) -> Result<(f64, TextCursor<'_>), Failure> {
    let cursor = cursor.assert(cursor.next_is(one_of(NUMBER_CHARS)), "Expected a JSON value")?;
    let (text, rest) = cursor.take_while(one_of(NUMBER_CHARS));
    let cursor = cursor.assert(is_json_number(text), "Malformed JSON number")?;
    let value = text
        .parse::<f64>()
        .map_err(|_| cursor.fail("Malformed JSON number"))?;
    // Overflow parses to infinity, which has no JSON spelling
    cursor.assert(value.is_finite(), "JSON number out of range")?;
    Ok((value, rest))
}

/// Whether `text` is exactly `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(text: &str) -> bool {
    let digit = |c: char| c.is_ascii_digit();

    let cursor = TextCursor::new(text).skip_one_if('-');
    let cursor = match cursor.take_one(digit) {
        (NUL, _) => return false,
        ('0', cursor) => cursor,
        (_, cursor) => cursor.skip_while(digit),
    };

    let cursor = match cursor.skip_char('.') {
        (cursor, true) => {
            let (fraction, cursor) = cursor.take_while(digit);
            if fraction.is_empty() {
                return false;
            }
            cursor
        }
        (cursor, false) => cursor,
    };

    let (e, cursor) = cursor.take_one(one_of("eE"));
    let cursor = if e == NUL {
        cursor
    } else {
        let (exponent, cursor) = cursor.skip_one_if(one_of("+-")).take_while(digit);
        if exponent.is_empty() {
            return false;
        }
        cursor
    };

    cursor.is_at_end()
}

/// Parse a quoted string, decoding escapes
pub fn parse_string(cursor: TextCursor<'_>) -> Result<(String, TextCursor<'_>), Failure> {
    let (cursor, open) = cursor.skip_char('"');
    let mut cursor = cursor.assert(open, "Open quote missing")?;
    let mut value = String::new();

    loop {
        let (run, rest) = cursor.take_while(|c: char| c != '"' && c != '\\');
        value.push_str(run);

        let rest = rest.assert(!rest.is_at_end(), "Found EOF instead of end quote")?;
        let (c, rest) = rest.take_any();
        if c == '"' {
            return Ok((value, rest));
        }

        let (decoded, rest) = parse_escape(rest)?;
        value.push(decoded);
        cursor = rest;
    }
}

/// Decode the escape sequence following a backslash
fn parse_escape(cursor: TextCursor<'_>) -> Result<(char, TextCursor<'_>), Failure> {
    let at_escape = cursor;
    let (c, cursor) = cursor.take_any();
    let decoded = match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return parse_unicode_escape(cursor),
        _ => return Err(at_escape.fail("Invalid escape sequence")),
    };
    Ok((decoded, cursor))
}

fn parse_hex4(cursor: TextCursor<'_>) -> Result<(u32, TextCursor<'_>), Failure> {
    let (digits, rest) = cursor.take_while_bounded(|c: char| c.is_ascii_hexdigit(), 4);
    let cursor = cursor.assert(digits.len() == 4, "Expected four hex digits")?;
    let value = u32::from_str_radix(digits, 16).map_err(|_| cursor.fail("Expected four hex digits"))?;
    Ok((value, rest))
}

fn parse_unicode_escape(cursor: TextCursor<'_>) -> Result<(char, TextCursor<'_>), Failure> {
    let at_escape = cursor;
    let (high, cursor) = parse_hex4(cursor)?;

    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high)
            .map(|c| (c, cursor))
            .ok_or_else(|| at_escape.fail("Invalid unicode escape"));
    }

    // High surrogate, must be followed by an escaped low surrogate
    let at_low = cursor.expect_literal("\\u", "Expected low surrogate")?;
    let (low, rest) = parse_hex4(at_low)?;
    at_low.assert((0xDC00..0xE000).contains(&low), "Expected low surrogate")?;

    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code)
        .map(|c| (c, rest))
        .ok_or_else(|| at_low.fail("Invalid unicode escape"))
}

/// Object members after the opening brace
fn parse_object(cursor: TextCursor<'_>) -> Result<(JsonValue, TextCursor<'_>), Failure> {
    let cursor = cursor.skip_while(char::is_whitespace);
    if let (cursor, true) = cursor.skip_char('}') {
        return Ok((JsonValue::Object(Vec::new()), cursor));
    }

    let (first, cursor) = parse_property(cursor)?;
    let (rest, cursor) = cursor.try_take_many(|cursor| -> Result<_, Failure> {
        let (cursor, comma) = cursor.skip_while(char::is_whitespace).skip_char(',');
        if !comma {
            return Ok((None, cursor));
        }
        let (property, cursor) = parse_property(cursor)?;
        Ok((Some(property), cursor))
    })?;

    let cursor = cursor.skip_while(char::is_whitespace);
    let (cursor, closed) = cursor.skip_char('}');
    let cursor = cursor.assert(closed, "Expected ',' or '}'")?;

    let mut properties = Vec::with_capacity(rest.len() + 1);
    properties.push(first);
    properties.extend(rest);
    Ok((JsonValue::Object(properties), cursor))
}

fn parse_property(
    cursor: TextCursor<'_>,
) -> Result<((String, JsonValue), TextCursor<'_>), Failure> {
    let cursor = cursor.skip_while(char::is_whitespace);
    let cursor = cursor.assert(cursor.next_is('"'), "Expected property name")?;
    let (name, cursor) = parse_string(cursor)?;
    let cursor = cursor
        .skip_while(char::is_whitespace)
        .expect_char(':')?
        .skip_while(char::is_whitespace);
    let (value, cursor) = parse_value(cursor)?;
    Ok(((name, value), cursor))
}

/// Array elements after the opening bracket
fn parse_array(cursor: TextCursor<'_>) -> Result<(JsonValue, TextCursor<'_>), Failure> {
    let cursor = cursor.skip_while(char::is_whitespace);
    if let (cursor, true) = cursor.skip_char(']') {
        return Ok((JsonValue::Array(Vec::new()), cursor));
    }

    let (first, cursor) = parse_value(cursor)?;
    let (rest, cursor) = cursor.try_take_many(|cursor| -> Result<_, Failure> {
        let (cursor, comma) = cursor.skip_while(char::is_whitespace).skip_char(',');
        if !comma {
            return Ok((None, cursor));
        }
        let (value, cursor) = parse_value(cursor.skip_while(char::is_whitespace))?;
        Ok((Some(value), cursor))
    })?;

    let cursor = cursor.skip_while(char::is_whitespace);
    let (cursor, closed) = cursor.skip_char(']');
    let cursor = cursor.assert(closed, "Expected ',' or ']'")?;

    let mut values = Vec::with_capacity(rest.len() + 1);
    values.push(first);
    values.extend(rest);
    Ok((JsonValue::Array(values), cursor))
}
