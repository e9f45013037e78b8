use std::fmt;

use crate::text;

/// A 1-based `(line, column)` position. Columns are measured in 16-bit code
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column in code units.
    pub column: u32,
}

impl Position {
    /// Creates a position.
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A character range between two positions; the start is inclusive, the end
/// exclusive. Empty when `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    /// First position covered.
    pub start: Position,
    /// First position past the range.
    pub end: Position,
}

impl CharRange {
    /// Creates a range from raw coordinates.
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        CharRange {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// Creates a range between two positions.
    pub fn from_positions(start: Position, end: Position) -> Self {
        CharRange { start, end }
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A 1-based, half-open range of lines. Empty when `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// First line covered.
    pub start: u32,
    /// First line past the range.
    pub end: u32,
}

impl LineRange {
    /// Creates a line range. `start` must not exceed `end`.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        LineRange { start, end }
    }

    /// Whether the range covers no lines.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of covered lines.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Smallest range covering both `self` and `other`.
    pub fn join(&self, other: &LineRange) -> LineRange {
        LineRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Half-open intersection test that also accepts exactly touching
    /// ranges.
    pub fn overlaps_or_touches(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A character-level change: the original range is replaced by the modified
/// range's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMapping {
    /// Replaced range in the original document.
    pub original: CharRange,
    /// Replacement range in the modified document.
    pub modified: CharRange,
}

/// A line-level change together with the character-level changes inside it.
///
/// Every inner change lies within the enclosing line ranges (the grouping
/// step widens the line ranges by at most one line at either end to absorb
/// changes that start past end-of-line or stop at column one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedLineRangeMapping {
    /// Replaced lines in the original document.
    pub original: LineRange,
    /// Replacement lines in the modified document.
    pub modified: LineRange,
    /// Character-level changes, sorted by original start position.
    pub inner_changes: Vec<RangeMapping>,
}

/// A block of lines that moved between the two documents. Move detection is
/// not implemented; the field on [`LinesDiff`](crate::LinesDiff) exists for
/// API completeness and is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovedText {
    /// Source lines of the move.
    pub original: LineRange,
    /// Destination lines of the move.
    pub modified: LineRange,
}

/// Converts character mappings (in document order) to grouped, line-aware
/// change records. Adjacent records are grouped while their line ranges
/// intersect or touch on either side.
pub(crate) fn line_range_mappings_from_range_mappings(
    alignments: &[RangeMapping],
    original_lines: &[&str],
    modified_lines: &[&str],
) -> Vec<DetailedLineRangeMapping> {
    let mut changes = Vec::new();
    let mut group: Vec<DetailedLineRangeMapping> = Vec::new();
    for mapping in alignments {
        let detailed = line_range_mapping_of(mapping, original_lines, modified_lines);
        if let Some(last) = group.last() {
            if !(last.original.overlaps_or_touches(&detailed.original)
                || last.modified.overlaps_or_touches(&detailed.modified))
            {
                flush_group(&mut changes, &mut group);
            }
        }
        group.push(detailed);
    }
    flush_group(&mut changes, &mut group);
    changes
}

fn flush_group(
    changes: &mut Vec<DetailedLineRangeMapping>,
    group: &mut Vec<DetailedLineRangeMapping>,
) {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return;
    };
    changes.push(DetailedLineRangeMapping {
        original: first.original.join(&last.original),
        modified: first.modified.join(&last.modified),
        inner_changes: group
            .iter()
            .flat_map(|member| member.inner_changes.iter().copied())
            .collect(),
    });
    group.clear();
}

/// Derives the line range of a single character mapping.
///
/// A change whose both sides stop at column one does not touch its final
/// line; a change whose both sides start past end-of-line does not touch its
/// first line. Either adjustment is skipped when it would empty the range.
fn line_range_mapping_of(
    mapping: &RangeMapping,
    original_lines: &[&str],
    modified_lines: &[&str],
) -> DetailedLineRangeMapping {
    let original = &mapping.original;
    let modified = &mapping.modified;
    let mut line_start_delta = 0i64;
    let mut line_end_delta = 0i64;

    if modified.end.column == 1
        && original.end.column == 1
        && i64::from(original.start.line) + line_start_delta <= i64::from(original.end.line)
        && i64::from(modified.start.line) + line_start_delta <= i64::from(modified.end.line)
    {
        line_end_delta = -1;
    }

    if modified.start.column - 1 >= line_length(modified_lines, modified.start.line)
        && original.start.column - 1 >= line_length(original_lines, original.start.line)
        && i64::from(original.start.line) <= i64::from(original.end.line) + line_end_delta
        && i64::from(modified.start.line) <= i64::from(modified.end.line) + line_end_delta
    {
        line_start_delta = 1;
    }

    let original_range = LineRange::new(
        (i64::from(original.start.line) + line_start_delta) as u32,
        (i64::from(original.end.line) + 1 + line_end_delta) as u32,
    );
    let modified_range = LineRange::new(
        (i64::from(modified.start.line) + line_start_delta) as u32,
        (i64::from(modified.end.line) + 1 + line_end_delta) as u32,
    );
    DetailedLineRangeMapping {
        original: original_range,
        modified: modified_range,
        inner_changes: vec![*mapping],
    }
}

fn line_length(lines: &[&str], line: u32) -> u32 {
    text::utf16_len(lines[(line - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_ranges_join_and_touch() {
        let a = LineRange::new(1, 3);
        let b = LineRange::new(3, 5);
        let c = LineRange::new(5, 5);
        assert!(a.overlaps_or_touches(&b));
        assert!(!a.overlaps_or_touches(&c));
        assert_eq!(a.join(&b), LineRange::new(1, 5));
        assert!(c.is_empty());
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn column_one_end_drops_the_final_line() {
        // replace all of line 2, both sides ending at the start of line 3
        let mapping = RangeMapping {
            original: CharRange::new(2, 1, 3, 1),
            modified: CharRange::new(2, 1, 3, 1),
        };
        let lines = ["a", "b", "c"];
        let detailed = line_range_mapping_of(&mapping, &lines, &lines);
        assert_eq!(detailed.original, LineRange::new(2, 3));
        assert_eq!(detailed.modified, LineRange::new(2, 3));
    }

    #[test]
    fn end_of_line_start_skips_the_first_line() {
        // an insertion anchored past the end of line 2
        let mapping = RangeMapping {
            original: CharRange::new(2, 2, 2, 2),
            modified: CharRange::new(2, 2, 3, 2),
        };
        let original = ["x", "y"];
        let modified = ["x", "y", "z"];
        let detailed = line_range_mapping_of(&mapping, &original, &modified);
        assert_eq!(detailed.original, LineRange::new(3, 3));
        assert_eq!(detailed.modified, LineRange::new(3, 4));
    }

    #[test]
    fn touching_mappings_group_into_one_change() {
        let lines = ["aaaa", "bbbb", "cccc"];
        let alignments = [
            RangeMapping {
                original: CharRange::new(1, 1, 1, 3),
                modified: CharRange::new(1, 1, 1, 2),
            },
            RangeMapping {
                original: CharRange::new(2, 1, 2, 2),
                modified: CharRange::new(2, 1, 2, 4),
            },
        ];
        let changes = line_range_mappings_from_range_mappings(&alignments, &lines, &lines);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].original, LineRange::new(1, 3));
        assert_eq!(changes[0].inner_changes.len(), 2);
    }

    #[test]
    fn separated_mappings_stay_apart() {
        let lines = ["aaaa", "bbbb", "cccc", "dddd", "eeee"];
        let alignments = [
            RangeMapping {
                original: CharRange::new(1, 1, 1, 3),
                modified: CharRange::new(1, 1, 1, 2),
            },
            RangeMapping {
                original: CharRange::new(5, 1, 5, 2),
                modified: CharRange::new(5, 1, 5, 4),
            },
        ];
        let changes = line_range_mappings_from_range_mappings(&alignments, &lines, &lines);
        assert_eq!(changes.len(), 2);
    }
}
