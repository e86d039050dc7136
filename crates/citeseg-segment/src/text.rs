//! Character-offset helpers.
//!
//! Every offset and length in this crate counts Unicode scalar values, not
//! bytes, so spans stay stable across ASCII and CJK text alike.

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by character offsets. Out-of-range bounds are clamped and an
/// inverted range yields `""`.
#[must_use]
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    &text[start_byte..end_byte]
}

/// The trailing `count` characters of `text` (all of it when shorter).
#[must_use]
pub fn char_tail(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((byte, _)) => &text[byte..],
        None => text,
    }
}

/// Leading `count` characters of `text`, with `"..."` appended when cut.
#[must_use]
pub fn snippet(text: &str, count: usize) -> String {
    let head = char_slice(text, 0, count);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        head.to_owned()
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(byte, _)| byte)
}

/// Byte positions of every character boundary, for repeated slicing of one
/// string. `bounds[i]` is the byte offset of character `i`; the last entry is
/// `text.len()`.
pub(crate) struct CharBounds<'a> {
    text: &'a str,
    bounds: Vec<usize>,
}

impl<'a> CharBounds<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let bounds = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, bounds }
    }

    pub(crate) fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[end]]
    }
}
