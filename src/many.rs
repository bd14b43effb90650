use crate::cursor::Cursor;

/// Drive `item` repeatedly, collecting every value it matches
///
/// `item` is called with the current cursor and returns the value it matched
/// (or `None`) together with the cursor after its attempt. On `Some` the
/// value is appended and the returned cursor becomes current; on `None` the
/// loop ends and whatever the failed attempt consumed is discarded, so the
/// resulting cursor is the one left by the last successful item.
///
/// An item that reports a match without consuming anything is called again
/// on the same input; grammars must make progress on every match.
pub fn take_many<'code, C, T, F>(mut cursor: C, mut item: F) -> (Vec<T>, C)
where
    C: Cursor<'code>,
    F: FnMut(C) -> (Option<T>, C),
{
    let mut results = Vec::new();

    loop {
        match item(cursor.clone()) {
            (Some(value), next_cursor) => {
                results.push(value);
                cursor = next_cursor;
            }
            (None, _) => break,
        }
    }

    (results, cursor)
}

/// As [`take_many`] for item parsers that can fail outright
///
/// `Ok((None, _))` means "no more items" and ends the loop normally. An `Err`
/// means malformed input: it is returned immediately and the values
/// collected so far are dropped.
pub fn try_take_many<'code, C, T, E, F>(mut cursor: C, mut item: F) -> Result<(Vec<T>, C), E>
where
    C: Cursor<'code>,
    F: FnMut(C) -> Result<(Option<T>, C), E>,
{
    let mut results = Vec::new();

    loop {
        match item(cursor.clone())? {
            (Some(value), next_cursor) => {
                results.push(value);
                cursor = next_cursor;
            }
            (None, _) => break,
        }
    }

    Ok((results, cursor))
}
