//! Line splitting for the crate's input convention.
//!
//! The diff consumes documents as slices of lines without their
//! terminators. The splitter here produces exactly that shape: lines are
//! cut at every `'\n'`, a trailing `'\r'` stays on its line, a trailing
//! `'\n'` yields a trailing empty line, and the empty document is a single
//! empty line.

use memchr::memchr;

/// Splits `text` into terminator-free lines.
///
/// ```
/// assert_eq!(makini_diff::sources::lines("a\r\nb\n"), ["a\r", "b", ""]);
/// assert_eq!(makini_diff::sources::lines(""), [""]);
/// ```
pub fn lines(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let bytes = text.as_bytes();
    let mut offset = 0;
    loop {
        match memchr(b'\n', &bytes[offset..]) {
            Some(idx) => {
                result.push(&text[offset..offset + idx]);
                offset += idx + 1;
            }
            None => {
                result.push(&text[offset..]);
                break;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::lines;

    #[test]
    fn splits_keep_carriage_returns() {
        assert_eq!(lines("a\nb"), ["a", "b"]);
        assert_eq!(lines("a\r\nb\r\n"), ["a\r", "b\r", ""]);
        assert_eq!(lines("\n"), ["", ""]);
        assert_eq!(lines(""), [""]);
    }
}
