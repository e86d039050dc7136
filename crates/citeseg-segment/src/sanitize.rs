//! Input normalization ahead of segmentation.

use std::borrow::Cow;

/// Replace control characters with a space.
///
/// Tab, line feed and carriage return are kept. Every replaced character maps
/// to exactly one space, so character offsets computed on the sanitized text
/// line up with the input. Returns the input unchanged (borrowed) when there
/// is nothing to replace.
#[must_use]
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_stripped) {
        return Cow::Borrowed(text);
    }
    let cleaned: String = text
        .chars()
        .map(|c| if is_stripped(c) { ' ' } else { c })
        .collect();
    tracing::trace!(chars = cleaned.chars().count(), "replaced control characters");
    Cow::Owned(cleaned)
}

/// Decode raw bytes as UTF-8, substituting U+FFFD for invalid sequences, then
/// apply [`sanitize`].
#[must_use]
pub fn sanitize_bytes(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    if matches!(decoded, Cow::Owned(_)) {
        tracing::debug!(
            bytes = bytes.len(),
            "input was not valid UTF-8, replaced invalid sequences"
        );
    }
    sanitize(&decoded).into_owned()
}

fn is_stripped(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_is_borrowed() {
        let text = "Plain text.\nSecond line.\tTabbed.";
        assert!(matches!(sanitize(text), Cow::Borrowed(_)));
    }

    #[test]
    fn control_chars_become_spaces() {
        let sanitized = sanitize("a\u{0}b\u{7}c\u{1b}d\u{7f}e");
        assert_eq!(sanitized, "a b c d e");
    }

    #[test]
    fn whitespace_controls_kept() {
        assert_eq!(sanitize("a\r\nb\tc"), "a\r\nb\tc");
    }

    #[test]
    fn character_count_preserved() {
        let input = "x\u{1}y\u{2}句\u{3}";
        assert_eq!(sanitize(input).chars().count(), input.chars().count());
    }

    #[test]
    fn invalid_utf8_replaced() {
        let bytes = b"valid \xff\xfe text";
        let text = sanitize_bytes(bytes);
        assert!(text.starts_with("valid "));
        assert!(text.ends_with(" text"));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn bytes_with_controls() {
        assert_eq!(sanitize_bytes(b"a\x00b"), "a b");
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize_bytes(b""), "");
    }
}
