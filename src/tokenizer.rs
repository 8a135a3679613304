//! Splits colon-delimited identifiers into fields.
//!
//! Colons inside `[...]` belong to the field (IPv6 literals); all other
//! colons are delimiters. Brackets are markers only and are not validated.

use crate::types::unwrap_address;

const DELIMITER: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    InBrackets,
}

/// Split `identifier` into its fields.
///
/// Never fails and always yields at least one field. Empty fields between
/// consecutive delimiters, and a trailing empty field, are preserved.
/// Each field that is fully wrapped in brackets has one pair stripped.
pub fn tokenize(identifier: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = State::Plain;

    for c in identifier.chars() {
        match (state, c) {
            (State::Plain, DELIMITER) => fields.push(std::mem::take(&mut current)),
            (State::Plain, '[') => {
                state = State::InBrackets;
                current.push(c);
            }
            (State::InBrackets, ']') => {
                state = State::Plain;
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
        .into_iter()
        .map(|field| unwrap_address(&field).to_string())
        .collect()
}
