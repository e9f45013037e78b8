//! Character-level refinement of a single line-level diff.
//!
//! The covered lines of both sides are flattened into [`CharSequence`]s, an
//! LCS is computed over them, the optimizer cascade is applied, and the
//! surviving diffs are translated back into 1-based `(line, column)`
//! mappings.

use crate::chars::CharSequence;
use crate::lcs::{self, SequenceDiff};
use crate::mapping::{CharRange, Position, RangeMapping};
use crate::optimize;
use crate::text;
use crate::util::Deadline;

pub(crate) struct RefinedDiff {
    pub mappings: Vec<RangeMapping>,
    pub hit_timeout: bool,
}

pub(crate) fn refine_diff(
    original_lines: &[&str],
    modified_lines: &[&str],
    diff: &SequenceDiff,
    deadline: &Deadline,
    consider_whitespace: bool,
    extend_to_subwords: bool,
) -> RefinedDiff {
    let (original_range, modified_range) = to_char_ranges(diff, original_lines, modified_lines);
    let slice1 = CharSequence::new(original_lines, original_range, consider_whitespace);
    let slice2 = CharSequence::new(modified_lines, modified_range, consider_whitespace);

    let result = lcs::diff(&slice1, &slice2, lcs::DP_CHAR_LIMIT, deadline);

    let mut diffs = result.diffs;
    diffs = optimize::optimize_sequence_diffs(&slice1, &slice2, diffs);
    diffs = optimize::extend_diffs_to_entire_word(&slice1, &slice2, diffs, false, false);
    if extend_to_subwords {
        diffs = optimize::extend_diffs_to_entire_word(&slice1, &slice2, diffs, true, true);
    }
    diffs = optimize::remove_short_matches(diffs);
    diffs = optimize::remove_very_short_matching_text_between_long_diffs(&slice1, &slice2, diffs);

    let mappings = diffs
        .iter()
        .map(|diff| RangeMapping {
            original: slice1.translate_range(&diff.seq1),
            modified: slice2.translate_range(&diff.seq2),
        })
        .collect();
    RefinedDiff {
        mappings,
        hit_timeout: result.hit_timeout,
    }
}

/// Converts a line-level diff into the pair of character ranges to slice.
///
/// When the exclusive end line still exists on both sides the ranges simply
/// run from column one to column one. Otherwise a range that reaches the end
/// of its document is closed at the last covered line's end column, and a
/// side with no lines at all is anchored as a zero-width range at the end of
/// the previous line.
fn to_char_ranges(
    diff: &SequenceDiff,
    original_lines: &[&str],
    modified_lines: &[&str],
) -> (CharRange, CharRange) {
    let original_start = diff.seq1.start + 1;
    let original_end_exclusive = diff.seq1.end + 1;
    let modified_start = diff.seq2.start + 1;
    let modified_end_exclusive = diff.seq2.end + 1;

    if original_end_exclusive as usize <= original_lines.len()
        && modified_end_exclusive as usize <= modified_lines.len()
    {
        return (
            CharRange::new(original_start, 1, original_end_exclusive, 1),
            CharRange::new(modified_start, 1, modified_end_exclusive, 1),
        );
    }

    if !diff.seq1.is_empty() && !diff.seq2.is_empty() {
        return (
            CharRange::from_positions(
                Position::new(original_start, 1),
                end_of_line(original_lines, original_end_exclusive - 1),
            ),
            CharRange::from_positions(
                Position::new(modified_start, 1),
                end_of_line(modified_lines, modified_end_exclusive - 1),
            ),
        );
    }

    if original_start > 1 && modified_start > 1 {
        return (
            CharRange::from_positions(
                end_of_line(original_lines, original_start - 1),
                end_of_line(original_lines, original_end_exclusive - 1),
            ),
            CharRange::from_positions(
                end_of_line(modified_lines, modified_start - 1),
                end_of_line(modified_lines, modified_end_exclusive - 1),
            ),
        );
    }

    // a degenerate diff at the document edge is absorbed by the
    // orchestrator's fast paths before refinement runs
    unreachable!("line diff {diff:?} cannot be anchored")
}

fn end_of_line(lines: &[&str], line: u32) -> Position {
    Position::new(line, text::utf16_len(lines[(line - 1) as usize]) + 1)
}

#[cfg(test)]
mod tests {
    use super::to_char_ranges;
    use crate::lcs::SequenceDiff;
    use crate::mapping::CharRange;

    #[test]
    fn interior_diffs_span_column_one_to_column_one() {
        let lines = ["a", "b", "c"];
        let (original, modified) =
            to_char_ranges(&SequenceDiff::new(1..2, 1..2), &lines, &lines);
        assert_eq!(original, CharRange::new(2, 1, 3, 1));
        assert_eq!(modified, CharRange::new(2, 1, 3, 1));
    }

    #[test]
    fn trailing_replacement_is_closed_at_the_last_line() {
        let original = ["aa", "bb"];
        let modified = ["aa", "ccc"];
        let (original_range, modified_range) =
            to_char_ranges(&SequenceDiff::new(1..2, 1..2), &original, &modified);
        assert_eq!(original_range, CharRange::new(2, 1, 2, 3));
        assert_eq!(modified_range, CharRange::new(2, 1, 2, 4));
    }

    #[test]
    fn trailing_insertion_anchors_at_the_previous_line_end() {
        let original = ["x", "y"];
        let modified = ["x", "y", "z"];
        let (original_range, modified_range) =
            to_char_ranges(&SequenceDiff::new(2..2, 2..3), &original, &modified);
        assert_eq!(original_range, CharRange::new(2, 2, 2, 2));
        assert_eq!(modified_range, CharRange::new(2, 2, 3, 2));
    }
}
