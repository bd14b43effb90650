//! XML subset on the accumulating [`ContextCursor`]
//!
//! Elements with identifier names, self-closing elements and text content.
//! Attributes, entities, comments and processing instructions are not
//! recognised. The grammar never aborts: it runs to the end and the first
//! failure recorded in the cursor decides the outcome.

use crate::cursor::Cursor;
use crate::cursors::ContextCursor;
use crate::error::ParseError;
use crate::parse;
use crate::predicate::not;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    /// `None` for a self-closing element, `<a/>`
    pub children: Option<Vec<XmlItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlItem {
    Element(XmlNode),
    Text(String),
}

impl XmlNode {
    pub fn children(&self) -> &[XmlItem] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_self_closing(&self) -> bool {
        self.children.is_none()
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children().iter().filter_map(|item| match item {
            XmlItem::Element(node) => Some(node),
            XmlItem::Text(_) => None,
        })
    }

    /// Concatenated text of the direct children
    pub fn text(&self) -> String {
        self.children()
            .iter()
            .filter_map(|item| match item {
                XmlItem::Text(text) => Some(text.as_str()),
                XmlItem::Element(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.children {
            None => write!(f, "<{}/>", self.name),
            Some(children) => {
                write!(f, "<{}>", self.name)?;
                for child in children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", self.name)
            }
        }
    }
}

impl fmt::Display for XmlItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlItem::Element(node) => node.fmt(f),
            XmlItem::Text(text) => f.write_str(text),
        }
    }
}

/// Parse a document holding a single root element
pub fn try_parse(text: &str) -> Result<XmlNode, ParseError<'_>> {
    parse::try_parse_collecting(text, |cursor| {
        let (root, cursor) = parse_node(cursor.skip_while(char::is_whitespace));
        let cursor = cursor.skip_while(char::is_whitespace);
        let at_end = cursor.is_at_end();
        (root, cursor.assert(at_end, "Expected end of document"))
    })
}

/// A letter followed by letters or digits, with surrounding whitespace skipped
fn parse_identifier(cursor: ContextCursor<'_>) -> (&str, ContextCursor<'_>) {
    let cursor = cursor.skip_while(char::is_whitespace);
    let starts = cursor.next_is(char::is_alphabetic);
    let (name, cursor) = cursor
        .assert(starts, "Expected identifier")
        .take_while(char::is_alphanumeric);
    (name, cursor.skip_while(char::is_whitespace))
}

/// Start tag; the flag is set for `<name/>`
fn parse_tag(cursor: ContextCursor<'_>) -> ((&str, bool), ContextCursor<'_>) {
    let (name, cursor) = parse_identifier(cursor.expect_char('<'));
    let (cursor, self_closing) = cursor.skip_literal("/>");
    let cursor = if self_closing {
        cursor
    } else {
        cursor.expect_char('>')
    };
    ((name, self_closing), cursor.skip_while(char::is_whitespace))
}

fn parse_end_tag<'code>(cursor: ContextCursor<'code>, name: &str) -> ContextCursor<'code> {
    let expected = || format!("Expected end tag </{}>", name);
    let (cursor, opened) = cursor.skip_literal("</");
    let (end_name, cursor) = parse_identifier(cursor.assert_with(opened, expected));
    cursor
        .assert_with(end_name == name, expected)
        .expect_char('>')
        .skip_while(char::is_whitespace)
}

/// Text and child elements up to the next end tag
fn parse_items(cursor: ContextCursor<'_>) -> (Vec<XmlItem>, ContextCursor<'_>) {
    cursor.take_many(|cursor| {
        // A failed child keeps its cursor so the error survives; stop after it
        if cursor.has_error() || cursor.is_at_end() || cursor.starts_with("</") {
            return (None, cursor);
        }

        if cursor.next_is('<') {
            let (node, cursor) = parse_node(cursor);
            (Some(XmlItem::Element(node)), cursor)
        } else {
            let (text, cursor) = cursor.take_while(not('<'));
            (Some(XmlItem::Text(text.to_owned())), cursor)
        }
    })
}

/// One element, including its children and end tag
pub fn parse_node(cursor: ContextCursor<'_>) -> (XmlNode, ContextCursor<'_>) {
    let ((name, self_closing), cursor) = parse_tag(cursor);
    if self_closing {
        let node = XmlNode {
            name: name.to_owned(),
            children: None,
        };
        return (node, cursor);
    }

    let (children, cursor) = parse_items(cursor);
    let cursor = parse_end_tag(cursor, name);
    let node = XmlNode {
        name: name.to_owned(),
        children: Some(children),
    };
    (node, cursor)
}
