use std::ops::Range;

use crate::mapping::{CharRange, Position};
use crate::sequence::Sequence;
use crate::text;
use crate::util::{find_first_monotonous, find_last_monotonous};

/// Which side of a trimmed-whitespace run a translated offset should stick
/// to when it falls exactly on a line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPreference {
    /// Report the column before the trimmed whitespace.
    Left,
    /// Report the column after the trimmed whitespace.
    Right,
}

/// Flattened code-unit stream for a slice of lines.
///
/// The covered slice of each line is concatenated into one element array
/// with `'\n'` between lines. When whitespace is ignored each line's slice
/// is trimmed at both ends first; the number of leading units removed is
/// remembered per line so offsets can be translated back to source columns.
pub struct CharSequence {
    elements: Vec<u32>,
    /// Offset into `elements` at which each covered line begins.
    line_start_offsets: Vec<u32>,
    /// 0-based code-unit column at which the slice begins on each source
    /// line (non-zero only for the first covered line).
    line_start_columns: Vec<u32>,
    /// Leading whitespace units trimmed from each line's slice.
    trimmed_ws_lengths: Vec<u32>,
    range: CharRange,
}

impl CharSequence {
    /// Flattens the lines covered by `range`. With `consider_whitespace`
    /// the slice content is taken verbatim; without it, each line's slice
    /// is trimmed at both ends.
    pub fn new(lines: &[&str], range: CharRange, consider_whitespace: bool) -> Self {
        let mut seq = CharSequence {
            elements: Vec::new(),
            line_start_offsets: vec![0],
            line_start_columns: Vec::new(),
            trimmed_ws_lengths: Vec::new(),
            range,
        };

        for line_number in range.start.line..=range.end.line {
            let mut units = text::encode_units(lines[(line_number - 1) as usize]);
            let mut line_start_column = 0u32;
            if line_number == range.start.line && range.start.column > 1 {
                line_start_column = range.start.column - 1;
                units.drain(..(line_start_column as usize).min(units.len()));
            }
            seq.line_start_columns.push(line_start_column);

            let mut trimmed_ws = 0u32;
            if !consider_whitespace {
                let leading = text::leading_ws_units(&units);
                trimmed_ws = leading as u32;
                units.drain(..leading);
                let trailing = text::trailing_ws_units(&units);
                units.truncate(units.len() - trailing);
            }
            seq.trimmed_ws_lengths.push(trimmed_ws);

            let line_len = if line_number == range.end.line {
                let wanted = i64::from(range.end.column) - 1
                    - i64::from(line_start_column)
                    - i64::from(trimmed_ws);
                wanted.clamp(0, units.len() as i64) as usize
            } else {
                units.len()
            };
            seq.elements
                .extend(units[..line_len].iter().map(|&unit| u32::from(unit)));

            if line_number < range.end.line {
                seq.elements.push(u32::from(b'\n'));
                seq.line_start_offsets.push(seq.elements.len() as u32);
            }
        }
        seq
    }

    /// The raw code-unit slice covered by `range`.
    pub fn text(&self, range: Range<u32>) -> &[u32] {
        &self.elements[range.start as usize..range.end as usize]
    }

    /// Maximal run of word characters (`[A-Za-z0-9]`) covering `offset`, or
    /// `None` if the element there is not a word character.
    pub fn find_word_containing(&self, offset: u32) -> Option<Range<u32>> {
        let offset = offset as usize;
        if offset >= self.elements.len() || !is_word_unit(self.elements[offset]) {
            return None;
        }
        let mut start = offset;
        while start > 0 && is_word_unit(self.elements[start - 1]) {
            start -= 1;
        }
        let mut end = offset;
        while end < self.elements.len() && is_word_unit(self.elements[end]) {
            end += 1;
        }
        Some(start as u32..end as u32)
    }

    /// Like [`find_word_containing`](CharSequence::find_word_containing) but
    /// also breaking at an uppercase character that is not at the scan
    /// position, so `fooBarBaz` splits into `foo`, `Bar` and `Baz`.
    pub fn find_subword_containing(&self, offset: u32) -> Option<Range<u32>> {
        let offset = offset as usize;
        if offset >= self.elements.len() || !is_word_unit(self.elements[offset]) {
            return None;
        }
        let mut start = offset;
        while start > 0 && is_word_unit(self.elements[start - 1]) && !is_upper_unit(self.elements[start]) {
            start -= 1;
        }
        let mut end = offset + 1;
        while end < self.elements.len()
            && is_word_unit(self.elements[end])
            && !is_upper_unit(self.elements[end])
        {
            end += 1;
        }
        Some(start as u32..end as u32)
    }

    /// Number of line breaks inside `range`.
    pub fn count_lines_in(&self, range: &Range<u32>) -> u32 {
        self.translate_offset(range.end, BoundaryPreference::Right).line
            - self.translate_offset(range.start, BoundaryPreference::Right).line
    }

    /// Snaps `range` outward to the enclosing line starts.
    pub fn extend_to_full_lines(&self, range: Range<u32>) -> Range<u32> {
        let start = find_last_monotonous(&self.line_start_offsets, |&offset| offset <= range.start)
            .map_or(0, |idx| self.line_start_offsets[idx]);
        let end = find_first_monotonous(&self.line_start_offsets, |&offset| range.end <= offset)
            .map_or(self.elements.len() as u32, |idx| self.line_start_offsets[idx]);
        start..end
    }

    /// Translates a flat offset back to a 1-based source position.
    pub fn translate_offset(&self, offset: u32, preference: BoundaryPreference) -> Position {
        let idx = find_last_monotonous(&self.line_start_offsets, |&start| start <= offset)
            .unwrap_or(0);
        let line_offset = offset - self.line_start_offsets[idx];
        let trimmed = if line_offset == 0 && preference == BoundaryPreference::Left {
            0
        } else {
            self.trimmed_ws_lengths[idx]
        };
        Position::new(
            self.range.start.line + idx as u32,
            1 + self.line_start_columns[idx] + line_offset + trimmed,
        )
    }

    /// Translates a flat range back to a source range; a backwards result
    /// collapses to its end position (an insertion point).
    pub fn translate_range(&self, range: &Range<u32>) -> CharRange {
        let start = self.translate_offset(range.start, BoundaryPreference::Right);
        let end = self.translate_offset(range.end, BoundaryPreference::Left);
        if end < start {
            CharRange::from_positions(end, end)
        } else {
            CharRange::from_positions(start, end)
        }
    }
}

impl Sequence for CharSequence {
    fn len(&self) -> u32 {
        self.elements.len() as u32
    }

    fn element(&self, offset: u32) -> u32 {
        self.elements[offset as usize]
    }

    fn is_strongly_equal(&self, offset1: u32, offset2: u32) -> bool {
        self.elements[offset1 as usize] == self.elements[offset2 as usize]
    }

    fn has_boundary_score(&self) -> bool {
        true
    }

    fn boundary_score(&self, offset: u32) -> i32 {
        let prev = category(if offset > 0 {
            Some(self.elements[offset as usize - 1])
        } else {
            None
        });
        let next = category(if (offset as usize) < self.elements.len() {
            Some(self.elements[offset as usize])
        } else {
            None
        });

        if prev == CharCategory::LineBreakCr && next == CharCategory::LineBreakLf {
            // never split between \r and \n
            return 0;
        }
        if prev == CharCategory::LineBreakLf {
            // prefer the break before the following line
            return 150;
        }

        let mut score = 0;
        if prev != next {
            score += 10;
            if prev == CharCategory::WordLower && next == CharCategory::WordUpper {
                score += 1;
            }
        }
        score + category_score(prev) + category_score(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharCategory {
    WordLower,
    WordUpper,
    WordNumber,
    End,
    Other,
    Separator,
    Space,
    LineBreakCr,
    LineBreakLf,
}

fn category(unit: Option<u32>) -> CharCategory {
    match unit {
        None => CharCategory::End,
        Some(unit) => match unit {
            0x0A => CharCategory::LineBreakLf,
            0x0D => CharCategory::LineBreakCr,
            0x20 | 0x09 => CharCategory::Space,
            0x61..=0x7A => CharCategory::WordLower,
            0x41..=0x5A => CharCategory::WordUpper,
            0x30..=0x39 => CharCategory::WordNumber,
            0x2C | 0x3B => CharCategory::Separator,
            _ => CharCategory::Other,
        },
    }
}

fn category_score(category: CharCategory) -> i32 {
    match category {
        CharCategory::WordLower | CharCategory::WordUpper | CharCategory::WordNumber => 0,
        CharCategory::Other => 2,
        CharCategory::Space => 3,
        CharCategory::End | CharCategory::LineBreakCr | CharCategory::LineBreakLf => 10,
        CharCategory::Separator => 30,
    }
}

fn is_word_unit(unit: u32) -> bool {
    matches!(unit, 0x30..=0x39 | 0x41..=0x5A | 0x61..=0x7A)
}

fn is_upper_unit(unit: u32) -> bool {
    matches!(unit, 0x41..=0x5A)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CharRange;

    fn seq(lines: &[&str], range: CharRange, consider_whitespace: bool) -> CharSequence {
        CharSequence::new(lines, range, consider_whitespace)
    }

    fn rendered(seq: &CharSequence) -> String {
        seq.text(0..seq.len())
            .iter()
            .map(|&unit| char::from_u32(unit).unwrap_or('?'))
            .collect()
    }

    #[test]
    fn flattens_the_covered_slice() {
        let lines = ["alpha", "beta", "gamma"];
        let s = seq(&lines, CharRange::new(1, 3, 3, 3), true);
        assert_eq!(rendered(&s), "pha\nbeta\nga");
        assert_eq!(s.count_lines_in(&(0..s.len())), 2);
    }

    #[test]
    fn trims_line_slices_when_whitespace_is_ignored() {
        let lines = ["  indented  ", "next"];
        let s = seq(&lines, CharRange::new(1, 1, 2, 5), false);
        assert_eq!(rendered(&s), "indented\nnext");
        // translating offset 0 lands after the trimmed run...
        let pos = s.translate_offset(0, BoundaryPreference::Right);
        assert_eq!((pos.line, pos.column), (1, 3));
        // ...unless the caller asks for the left edge
        let pos = s.translate_offset(0, BoundaryPreference::Left);
        assert_eq!((pos.line, pos.column), (1, 1));
    }

    #[test]
    fn words_and_subwords() {
        let lines = ["one fooBarBaz2 end"];
        let s = seq(&lines, CharRange::new(1, 1, 1, 19), true);
        assert_eq!(s.find_word_containing(5), Some(4..14));
        assert_eq!(s.find_word_containing(3), None);
        assert_eq!(s.find_subword_containing(5), Some(4..7)); // foo
        assert_eq!(s.find_subword_containing(7), Some(7..10)); // Bar
        assert_eq!(s.find_subword_containing(10), Some(10..14)); // Baz2
    }

    #[test]
    fn extend_to_full_lines_snaps_outward() {
        let lines = ["aaa", "bbb", "ccc"];
        let s = seq(&lines, CharRange::new(1, 1, 3, 4), true);
        // "aaa\nbbb\nccc": offsets 5..6 live inside "bbb"
        assert_eq!(s.extend_to_full_lines(5..6), 4..8);
        assert_eq!(s.extend_to_full_lines(0..11), 0..11);
    }

    #[test]
    fn boundary_scores_follow_categories() {
        let lines = ["ab, cd", "x"];
        let s = seq(&lines, CharRange::new(1, 1, 2, 2), true);
        // document edge against a word character
        assert_eq!(s.boundary_score(0), 20);
        // word against separator
        assert_eq!(s.boundary_score(2), 40);
        // right after a line feed
        assert_eq!(s.boundary_score(7), 150);
        // word against the end of the sequence
        assert_eq!(s.boundary_score(8), 20);

        let lines = ["aBc"];
        let s = seq(&lines, CharRange::new(1, 1, 1, 4), true);
        // camelCase hump earns the extra point
        assert_eq!(s.boundary_score(1), 11);

        let lines = ["x\r", "y"];
        let s = seq(&lines, CharRange::new(1, 1, 2, 2), true);
        // never split between \r and \n
        assert_eq!(s.boundary_score(2), 0);
    }
}
