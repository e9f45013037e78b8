//! Helpers for the external code-unit space.
//!
//! Columns are reported in 16-bit code units (a code point above `U+FFFF`
//! counts as two units), so lines are re-encoded at the boundary whenever a
//! character sequence is built or a column is clamped.

/// Whitespace classification over a fixed set: `U+0009..U+000D`, `U+0020`,
/// `U+00A0`, `U+1680`, `U+2000..U+200A`, `U+2028`, `U+2029`, `U+202F`,
/// `U+205F` and `U+3000`.
pub fn is_whitespace(cp: u32) -> bool {
    matches!(
        cp,
        0x0009..=0x000D
            | 0x0020
            | 0x00A0
            | 0x1680
            | 0x2000..=0x200A
            | 0x2028
            | 0x2029
            | 0x202F
            | 0x205F
            | 0x3000
    )
}

/// [`is_whitespace`] over a decoded character.
pub fn is_whitespace_char(c: char) -> bool {
    is_whitespace(c as u32)
}

/// Strips the [`is_whitespace`] set from both ends of a line.
pub fn trim(line: &str) -> &str {
    line.trim_matches(is_whitespace_char)
}

/// Length of `s` in 16-bit code units.
pub fn utf16_len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Number of leading `' '` or `'\t'` code units of a line.
pub fn indentation(line: &str) -> u32 {
    line.bytes().take_while(|&b| b == b' ' || b == b'\t').count() as u32
}

pub(crate) fn encode_units(line: &str) -> Vec<u16> {
    line.encode_utf16().collect()
}

pub(crate) fn leading_ws_units(units: &[u16]) -> usize {
    units
        .iter()
        .take_while(|&&unit| is_whitespace(unit as u32))
        .count()
}

pub(crate) fn trailing_ws_units(units: &[u16]) -> usize {
    units
        .iter()
        .rev()
        .take_while(|&&unit| is_whitespace(unit as u32))
        .count()
}

/// Length of `units` once the whitespace set is stripped from both ends.
pub(crate) fn trimmed_len_units(units: &[u32]) -> usize {
    let leading = units
        .iter()
        .take_while(|&&unit| is_whitespace(unit))
        .count();
    let trailing = units[leading..]
        .iter()
        .rev()
        .take_while(|&&unit| is_whitespace(unit))
        .count();
    units.len() - leading - trailing
}

/// The trimmed sub-slice of `units`.
pub(crate) fn trimmed_units(units: &[u32]) -> &[u32] {
    let leading = units
        .iter()
        .take_while(|&&unit| is_whitespace(unit))
        .count();
    let trailing = units[leading..]
        .iter()
        .rev()
        .take_while(|&&unit| is_whitespace(unit))
        .count();
    &units[leading..units.len() - trailing]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_set_is_exact() {
        for cp in [
            0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20, 0xA0, 0x1680, 0x2000, 0x200A, 0x2028, 0x2029,
            0x202F, 0x205F, 0x3000,
        ] {
            assert!(is_whitespace(cp), "{cp:#x} should be whitespace");
        }
        for cp in [0x08, 0x0E, 0x1F, 0x21, 0x200B, 0x2030, 0xFEFF, 0x61] {
            assert!(!is_whitespace(cp), "{cp:#x} should not be whitespace");
        }
    }

    #[test]
    fn utf16_lengths() {
        assert_eq!(utf16_len(""), 0);
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("aéz"), 3);
        // a supplementary-plane code point counts as two units
        assert_eq!(utf16_len("a😀z"), 4);
    }

    #[test]
    fn trims_the_fixed_set() {
        assert_eq!(trim("  x\t"), "x");
        assert_eq!(trim("\u{00A0}x\u{3000}"), "x");
        // zero-width space is not in the set
        assert_eq!(trim("\u{200B}x"), "\u{200B}x");
    }

    #[test]
    fn indentation_counts_units() {
        assert_eq!(indentation(""), 0);
        assert_eq!(indentation("  \tfn"), 3);
        assert_eq!(indentation("fn"), 0);
    }
}
