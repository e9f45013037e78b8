//! Heuristic post-processing of raw LCS output.
//!
//! An LCS produces a minimal edit script, not a readable one. The passes in
//! this module shift diffs onto natural boundaries, join diffs that a human
//! would read as one edit, and extend diffs over words that changed beyond
//! recognition. All passes preserve the validity of the edit script: the
//! equal regions between diffs stay equal under the sequence's element
//! identity.

use std::collections::VecDeque;
use std::ops::Range;

use crate::chars::CharSequence;
use crate::lcs::{ranges_overlap, SequenceDiff};
use crate::sequence::{LineSequence, Sequence};
use crate::text;

/// Hard cap on how far a single diff may be shifted towards a better
/// boundary.
const MAX_SHIFT_LIMIT: i64 = 100;

/// Joins diffs that become adjacent after shifting, then moves pure
/// insertions and deletions to the highest-scoring nearby boundary.
///
/// Running this on its own output is a no-op.
pub fn optimize_sequence_diffs<S: Sequence>(
    seq1: &S,
    seq2: &S,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    let diffs = join_sequence_diffs_by_shifting(seq1, seq2, diffs);
    // a second pass catches pairs the first one made adjacent
    let diffs = join_sequence_diffs_by_shifting(seq1, seq2, diffs);
    shift_sequence_diffs(seq1, seq2, diffs)
}

/// Slides each pure insertion or deletion first left against its
/// predecessor (under element equality), then right against its successor
/// (under strong equality), merging the pair whenever the whole gap can be
/// crossed.
fn join_sequence_diffs_by_shifting<S: Sequence>(
    seq1: &S,
    seq2: &S,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    if diffs.is_empty() {
        return diffs;
    }

    let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());
    result.push(diffs[0].clone());
    for cur in &diffs[1..] {
        let mut cur = cur.clone();
        if cur.is_insertion() || cur.is_deletion() {
            let prev = &result[result.len() - 1];
            let length = i64::from(cur.seq1.start - prev.seq1.end);
            let mut d = 1;
            while d <= length {
                if seq1.element((i64::from(cur.seq1.start) - d) as u32)
                    != seq1.element((i64::from(cur.seq1.end) - d) as u32)
                    || seq2.element((i64::from(cur.seq2.start) - d) as u32)
                        != seq2.element((i64::from(cur.seq2.end) - d) as u32)
                {
                    break;
                }
                d += 1;
            }
            d -= 1;
            if d == length {
                let last = result.len() - 1;
                result[last] = SequenceDiff::new(
                    result[last].seq1.start..cur.seq1.end - length as u32,
                    result[last].seq2.start..cur.seq2.end - length as u32,
                );
                continue;
            }
            cur = cur.delta(-d);
        }
        result.push(cur);
    }

    let mut shifted: Vec<SequenceDiff> = Vec::with_capacity(result.len());
    for idx in 0..result.len() - 1 {
        let next = result[idx + 1].clone();
        let mut cur = result[idx].clone();
        if cur.is_insertion() || cur.is_deletion() {
            let length = i64::from(next.seq1.start - cur.seq1.end);
            let mut d = 0;
            while d < length {
                if !seq1.is_strongly_equal(cur.seq1.start + d as u32, cur.seq1.end + d as u32)
                    || !seq2.is_strongly_equal(cur.seq2.start + d as u32, cur.seq2.end + d as u32)
                {
                    break;
                }
                d += 1;
            }
            if d == length {
                result[idx + 1] = SequenceDiff::new(
                    cur.seq1.start + length as u32..next.seq1.end,
                    cur.seq2.start + length as u32..next.seq2.end,
                );
                continue;
            }
            if d > 0 {
                cur = cur.delta(d);
            }
        }
        shifted.push(cur);
    }
    shifted.push(result[result.len() - 1].clone());
    shifted
}

/// Moves each pure insertion or deletion to the admissible position with the
/// best combined boundary score.
fn shift_sequence_diffs<S: Sequence>(
    seq1: &S,
    seq2: &S,
    mut diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    if !seq1.has_boundary_score() || !seq2.has_boundary_score() {
        return diffs;
    }
    for idx in 0..diffs.len() {
        let seq1_valid = valid_range(&diffs, idx, seq1.len(), |diff| &diff.seq1);
        let seq2_valid = valid_range(&diffs, idx, seq2.len(), |diff| &diff.seq2);
        let diff = diffs[idx].clone();
        if diff.is_insertion() {
            diffs[idx] = shift_diff_to_better_position(diff, seq1, seq2, seq1_valid, seq2_valid);
        } else if diff.is_deletion() {
            diffs[idx] = shift_diff_to_better_position(diff.swap(), seq2, seq1, seq2_valid, seq1_valid)
                .swap();
        }
    }
    diffs
}

/// The offsets `diffs[idx]` may move over without touching its neighbours.
fn valid_range(
    diffs: &[SequenceDiff],
    idx: usize,
    len: u32,
    side: impl Fn(&SequenceDiff) -> &Range<u32>,
) -> Range<u32> {
    let start = if idx > 0 { side(&diffs[idx - 1]).end + 1 } else { 0 };
    let end = if idx + 1 < diffs.len() {
        side(&diffs[idx + 1]).start.saturating_sub(1)
    } else {
        len
    };
    start..end
}

/// `diff` must be a pure insertion in `seq1`. Probes every admissible shift
/// and applies the one with the best combined boundary score.
fn shift_diff_to_better_position<S: Sequence>(
    diff: SequenceDiff,
    seq1: &S,
    seq2: &S,
    seq1_valid: Range<u32>,
    seq2_valid: Range<u32>,
) -> SequenceDiff {
    let mut delta_before: i64 = 1;
    while i64::from(diff.seq1.start) - delta_before >= i64::from(seq1_valid.start)
        && i64::from(diff.seq2.start) - delta_before >= i64::from(seq2_valid.start)
        && seq2.is_strongly_equal(
            (i64::from(diff.seq2.start) - delta_before) as u32,
            (i64::from(diff.seq2.end) - delta_before) as u32,
        )
        && delta_before < MAX_SHIFT_LIMIT
    {
        delta_before += 1;
    }
    delta_before -= 1;

    let mut delta_after: i64 = 0;
    while i64::from(diff.seq1.start) + delta_after < i64::from(seq1_valid.end)
        && i64::from(diff.seq2.end) + delta_after < i64::from(seq2_valid.end)
        && seq2.is_strongly_equal(
            (i64::from(diff.seq2.start) + delta_after) as u32,
            (i64::from(diff.seq2.end) + delta_after) as u32,
        )
        && delta_after < MAX_SHIFT_LIMIT
    {
        delta_after += 1;
    }

    if delta_before == 0 && delta_after == 0 {
        return diff;
    }

    let mut best_delta = 0;
    let mut best_score = -1;
    for delta in -delta_before..=delta_after {
        let seq2_start = (i64::from(diff.seq2.start) + delta) as u32;
        let seq2_end = (i64::from(diff.seq2.end) + delta) as u32;
        let seq1_offset = (i64::from(diff.seq1.start) + delta) as u32;
        let score = seq1.boundary_score(seq1_offset)
            + seq2.boundary_score(seq2_start)
            + seq2.boundary_score(seq2_end);
        if score > best_score {
            best_score = score;
            best_delta = delta;
        }
    }
    diff.delta(best_delta)
}

/// Merges consecutive diffs whose unchanged gap is at most two elements in
/// either sequence.
pub fn remove_short_matches(diffs: Vec<SequenceDiff>) -> Vec<SequenceDiff> {
    let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());
    for diff in diffs {
        match result.last_mut() {
            Some(last)
                if i64::from(diff.seq1.start) - i64::from(last.seq1.end) <= 2
                    || i64::from(diff.seq2.start) - i64::from(last.seq2.end) <= 2 =>
            {
                *last = last.join(&diff);
            }
            _ => result.push(diff),
        }
    }
    result
}

/// Joins line-level diffs whose unchanged gap carries at most four
/// non-whitespace code points, provided at least one side of the join spans
/// more than five lines in total. Iterates to a fixpoint (at most ten
/// rounds), since every join can expose the next candidate.
pub fn remove_very_short_matching_lines_between_diffs(
    seq1: &LineSequence<'_>,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    if diffs.is_empty() {
        return diffs;
    }
    let mut diffs = diffs;
    let mut counter = 0;
    loop {
        let mut should_repeat = false;
        let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());
        result.push(diffs[0].clone());
        for cur in &diffs[1..] {
            let last = &result[result.len() - 1];
            let gap = last.seq1.end..cur.seq1.start;
            let gap_weight = seq1
                .text(gap)
                .chars()
                .filter(|&c| !text::is_whitespace_char(c))
                .count();
            let should_join = gap_weight <= 4
                && (last.seq1_len() + last.seq2_len() > 5 || cur.seq1_len() + cur.seq2_len() > 5);
            if should_join {
                should_repeat = true;
                let idx = result.len() - 1;
                result[idx] = result[idx].join(cur);
            } else {
                result.push(cur.clone());
            }
        }
        diffs = result;
        counter += 1;
        if !(counter < 10 && should_repeat) {
            break;
        }
    }
    diffs
}

/// Extends character diffs to cover whole words (with `use_subwords`,
/// camelCase humps) when enough of the word changed: always short of full
/// equality under `force`, otherwise when less than two thirds of the
/// combined word length is unchanged.
pub fn extend_diffs_to_entire_word(
    seq1: &CharSequence,
    seq2: &CharSequence,
    diffs: Vec<SequenceDiff>,
    use_subwords: bool,
    force: bool,
) -> Vec<SequenceDiff> {
    let scanner = WordScanner {
        seq1,
        seq2,
        use_subwords,
        force,
        equal_mappings: SequenceDiff::invert(&diffs, seq1.len(), seq2.len()).into(),
        additional: Vec::new(),
        last_point: (0, 0),
    };
    let additional = scanner.run();
    merge_sequence_diffs(diffs, additional)
}

struct WordScanner<'a> {
    seq1: &'a CharSequence,
    seq2: &'a CharSequence,
    use_subwords: bool,
    force: bool,
    equal_mappings: VecDeque<SequenceDiff>,
    additional: Vec<SequenceDiff>,
    last_point: (u32, u32),
}

impl WordScanner<'_> {
    fn run(mut self) -> Vec<SequenceDiff> {
        while let Some(equal) = self.equal_mappings.pop_front() {
            if equal.seq1_len() == 0 {
                continue;
            }
            self.scan_word(equal.starts(), &equal);
            self.scan_word((equal.seq1.end - 1, equal.seq2.end - 1), &equal);
        }
        self.additional
    }

    fn find(&self, seq: &CharSequence, offset: u32) -> Option<Range<u32>> {
        if self.use_subwords {
            seq.find_subword_containing(offset)
        } else {
            seq.find_word_containing(offset)
        }
    }

    /// Grows the words containing `pair` across as many subsequent equal
    /// spans as they reach, then records the joined word as an additional
    /// diff if enough of it changed.
    fn scan_word(&mut self, pair: (u32, u32), equal: &SequenceDiff) {
        if pair.0 < self.last_point.0 || pair.1 < self.last_point.1 {
            return;
        }
        let Some(word1) = self.find(self.seq1, pair.0) else {
            return;
        };
        let Some(word2) = self.find(self.seq2, pair.1) else {
            return;
        };
        let mut word = SequenceDiff::new(word1, word2);
        let Some(equal_part) = word.intersect(equal) else {
            return;
        };
        let mut equal_chars1 = equal_part.seq1_len();
        let mut equal_chars2 = equal_part.seq2_len();

        // the words cannot reach previous equal spans (those were already
        // scanned), but they may reach the next ones
        while let Some(next) = self.equal_mappings.front().cloned() {
            let intersects = ranges_overlap(&next.seq1, &word.seq1)
                || ranges_overlap(&next.seq2, &word.seq2);
            if !intersects {
                break;
            }
            let (Some(next_word1), Some(next_word2)) = (
                self.find(self.seq1, next.seq1.start),
                self.find(self.seq2, next.seq2.start),
            ) else {
                break;
            };
            let next_word = SequenceDiff::new(next_word1, next_word2);
            let Some(equal_part) = next_word.intersect(&next) else {
                break;
            };
            equal_chars1 += equal_part.seq1_len();
            equal_chars2 += equal_part.seq2_len();
            word = word.join(&next_word);
            if word.seq1.end >= next.seq1.end {
                // the word extends beyond this equal span, consume it
                self.equal_mappings.pop_front();
            } else {
                break;
            }
        }

        let word_len = f64::from(word.seq1_len() + word.seq2_len());
        let equal_chars = f64::from(equal_chars1 + equal_chars2);
        if (self.force && equal_chars < word_len) || equal_chars < word_len * 2.0 / 3.0 {
            self.additional.push(word.clone());
        }
        self.last_point = word.ends();
    }
}

/// Merges two sorted diff lists, unifying entries that touch or overlap in
/// the first sequence.
fn merge_sequence_diffs(
    diffs1: Vec<SequenceDiff>,
    diffs2: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs1.len() + diffs2.len());
    let mut iter1 = diffs1.into_iter().peekable();
    let mut iter2 = diffs2.into_iter().peekable();
    loop {
        let take_first = match (iter1.peek(), iter2.peek()) {
            (Some(first), Some(second)) => first.seq1.start < second.seq1.start,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_first { iter1.next() } else { iter2.next() };
        let Some(next) = next else { break };
        match result.last_mut() {
            Some(last) if last.seq1.end >= next.seq1.start => *last = last.join(&next),
            _ => result.push(next),
        }
    }
    result
}

/// Absorbs short unchanged text trapped between two substantial character
/// diffs (fixpoint, at most ten rounds), then extends diffs over
/// nearly-blank line prefixes and suffixes.
pub fn remove_very_short_matching_text_between_long_diffs(
    seq1: &CharSequence,
    seq2: &CharSequence,
    diffs: Vec<SequenceDiff>,
) -> Vec<SequenceDiff> {
    if diffs.is_empty() {
        return diffs;
    }
    let mut diffs = diffs;
    let mut counter = 0;
    loop {
        let mut should_repeat = false;
        let mut result: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());
        result.push(diffs[0].clone());
        for cur in &diffs[1..] {
            let last = &result[result.len() - 1];
            if should_join_long_diffs(seq1, seq2, last, cur) {
                should_repeat = true;
                let idx = result.len() - 1;
                result[idx] = result[idx].join(cur);
            } else {
                result.push(cur.clone());
            }
        }
        diffs = result;
        counter += 1;
        if !(counter < 10 && should_repeat) {
            break;
        }
    }

    let mut extended: Vec<SequenceDiff> = Vec::with_capacity(diffs.len());
    for idx in 0..diffs.len() {
        let cur = &diffs[idx];
        let mut new_diff = cur.clone();

        let diff_weight = cur.seq1_len() + cur.seq2_len();
        let full_range1 = seq1.extend_to_full_lines(cur.seq1.clone());
        let prefix = full_range1.start..cur.seq1.start;
        if should_mark_as_changed(seq1, &prefix, diff_weight) {
            new_diff = new_diff.delta_start(-i64::from(prefix.end - prefix.start));
        }
        let suffix = cur.seq1.end..full_range1.end;
        if should_mark_as_changed(seq1, &suffix, diff_weight) {
            new_diff = new_diff.delta_end(i64::from(suffix.end - suffix.start));
        }

        let available_start = if idx > 0 { diffs[idx - 1].ends() } else { (0, 0) };
        let available_end = if idx + 1 < diffs.len() {
            diffs[idx + 1].starts()
        } else {
            (u32::MAX, u32::MAX)
        };
        let available = SequenceDiff::new(
            available_start.0..available_end.0,
            available_start.1..available_end.1,
        );
        let Some(clamped) = new_diff.intersect(&available) else {
            continue;
        };
        match extended.last_mut() {
            Some(last) if last.ends() == clamped.starts() => *last = last.join(&clamped),
            _ => extended.push(clamped),
        }
    }
    extended
}

/// A prefix or suffix slice qualifies when it is non-empty, nearly blank
/// (at most three code units once trimmed) and the diff it would extend is
/// already long.
fn should_mark_as_changed(seq1: &CharSequence, slice: &Range<u32>, diff_weight: u32) -> bool {
    if slice.start == slice.end {
        return false;
    }
    let trimmed = text::trimmed_len_units(seq1.text(slice.clone()));
    trimmed <= 3 && diff_weight > 100
}

/// Number of line breaks in `units`; a `\r\n` pair counts as one break.
fn count_line_breaks(units: &[u32]) -> usize {
    let mut breaks = 0;
    let mut idx = 0;
    while idx < units.len() {
        match units[idx] {
            0x0D => {
                breaks += 1;
                if units.get(idx + 1) == Some(&0x0A) {
                    idx += 1;
                }
            }
            0x0A => breaks += 1,
            _ => {}
        }
        idx += 1;
    }
    breaks
}

fn should_join_long_diffs(
    seq1: &CharSequence,
    seq2: &CharSequence,
    before: &SequenceDiff,
    after: &SequenceDiff,
) -> bool {
    let unchanged = before.seq1.end..after.seq1.start;
    if seq1.count_lines_in(&unchanged) > 5 || unchanged.end - unchanged.start > 500 {
        return false;
    }
    let trimmed = text::trimmed_units(seq1.text(unchanged));
    if trimmed.len() > 20 || count_line_breaks(trimmed) > 1 {
        return false;
    }

    let max = 2.0 * 40.0 + 50.0;
    let cap = |value: f64| value.min(max);
    let side_score = |line_count: u32, len: u32| {
        cap(f64::from(line_count) * 40.0 + f64::from(len)).powf(1.5)
    };
    let diff_score = |diff: &SequenceDiff| {
        (side_score(seq1.count_lines_in(&diff.seq1), diff.seq1_len())
            + side_score(seq2.count_lines_in(&diff.seq2), diff.seq2_len()))
        .powf(1.5)
    };
    diff_score(before) + diff_score(after) > max.powf(1.5).powf(1.5) * 1.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CharRange;

    fn char_seq(lines: &[&str]) -> CharSequence {
        CharSequence::new(
            lines,
            CharRange::new(
                1,
                1,
                lines.len() as u32,
                text::utf16_len(lines[lines.len() - 1]) + 1,
            ),
            true,
        )
    }

    #[test]
    fn short_matches_between_diffs_are_removed() {
        let diffs = vec![
            SequenceDiff::new(0..3, 0..2),
            SequenceDiff::new(5..7, 4..6),
            SequenceDiff::new(12..13, 11..12),
        ];
        let merged = remove_short_matches(diffs);
        assert_eq!(
            merged,
            [SequenceDiff::new(0..7, 0..6), SequenceDiff::new(12..13, 11..12)]
        );
    }

    #[test]
    fn merging_unifies_touching_diffs() {
        let merged = merge_sequence_diffs(
            vec![SequenceDiff::new(0..2, 0..2), SequenceDiff::new(10..12, 10..12)],
            vec![SequenceDiff::new(2..5, 2..5), SequenceDiff::new(7..8, 7..8)],
        );
        assert_eq!(
            merged,
            [
                SequenceDiff::new(0..5, 0..5),
                SequenceDiff::new(7..8, 7..8),
                SequenceDiff::new(10..12, 10..12),
            ]
        );
    }

    #[test]
    fn insertions_shift_to_the_strongest_boundary_within_the_cap() {
        // in an all-equal run every interior position scores alike and the
        // document edges win
        let short1 = "a".repeat(60);
        let short2 = "a".repeat(61);
        let seq1 = char_seq(&[short1.as_str()]);
        let seq2 = char_seq(&[short2.as_str()]);
        let shifted = shift_sequence_diffs(&seq1, &seq2, vec![SequenceDiff::new(30..30, 30..31)]);
        assert_eq!(shifted, [SequenceDiff::new(0..0, 0..1)]);

        // with the edges more than a hundred positions away the cap keeps
        // them out of reach and the diff stops at the window boundary
        let long1 = "a".repeat(300);
        let long2 = "a".repeat(301);
        let seq1 = char_seq(&[long1.as_str()]);
        let seq2 = char_seq(&[long2.as_str()]);
        let shifted =
            shift_sequence_diffs(&seq1, &seq2, vec![SequenceDiff::new(150..150, 150..151)]);
        assert_eq!(shifted, [SequenceDiff::new(51..51, 51..52)]);
    }

    #[test]
    fn long_diffs_absorb_a_gap_spanning_one_line_break() {
        let first = "x".repeat(140);
        let last = "y".repeat(140);
        let lines = [first.as_str(), "ab", "cd", last.as_str()];
        let seq = char_seq(&lines);
        let before = SequenceDiff::new(0..140, 0..140);
        let after = SequenceDiff::new(147..287, 147..287);
        assert!(should_join_long_diffs(&seq, &seq, &before, &after));

        let merged =
            remove_very_short_matching_text_between_long_diffs(&seq, &seq, vec![before, after]);
        assert_eq!(merged, [SequenceDiff::new(0..287, 0..287)]);
    }

    #[test]
    fn a_crlf_break_in_the_gap_counts_once() {
        let first = "x".repeat(140);
        let last = "y".repeat(140);
        let lines = [first.as_str(), "ab\r", "cd", last.as_str()];
        let seq = char_seq(&lines);
        let before = SequenceDiff::new(0..140, 0..140);
        let after = SequenceDiff::new(148..288, 148..288);
        assert!(should_join_long_diffs(&seq, &seq, &before, &after));
    }

    #[test]
    fn gaps_spanning_two_line_breaks_stay() {
        let first = "x".repeat(140);
        let last = "y".repeat(140);
        let lines = [first.as_str(), "ab", "cd", "ef", last.as_str()];
        let seq = char_seq(&lines);
        let before = SequenceDiff::new(0..140, 0..140);
        let after = SequenceDiff::new(150..290, 150..290);
        assert!(!should_join_long_diffs(&seq, &seq, &before, &after));
    }

    #[test]
    fn gaps_with_more_than_twenty_characters_stay() {
        let first = "x".repeat(140);
        let last = "y".repeat(140);
        let lines = [first.as_str(), "twenty one characters", last.as_str()];
        let seq = char_seq(&lines);
        let before = SequenceDiff::new(0..140, 0..140);
        let after = SequenceDiff::new(163..303, 163..303);
        assert!(!should_join_long_diffs(&seq, &seq, &before, &after));
    }

    #[test]
    fn short_diffs_do_not_absorb_their_gap() {
        let line = "a".repeat(20);
        let seq = char_seq(&[line.as_str()]);
        let before = SequenceDiff::new(0..5, 0..5);
        let after = SequenceDiff::new(10..15, 10..15);
        assert!(!should_join_long_diffs(&seq, &seq, &before, &after));
    }

    #[test]
    fn long_diffs_extend_over_nearly_blank_prefixes() {
        let line = format!("qq{}", "m".repeat(120));
        let seq = char_seq(&[line.as_str()]);
        let extended = remove_very_short_matching_text_between_long_diffs(
            &seq,
            &seq,
            vec![SequenceDiff::new(2..122, 2..122)],
        );
        assert_eq!(extended, [SequenceDiff::new(0..122, 0..122)]);

        // four leading characters is no longer "nearly blank"
        let line = format!("qqqq{}", "m".repeat(120));
        let seq = char_seq(&[line.as_str()]);
        let diffs = vec![SequenceDiff::new(4..124, 4..124)];
        let kept =
            remove_very_short_matching_text_between_long_diffs(&seq, &seq, diffs.clone());
        assert_eq!(kept, diffs);
    }

    #[test]
    fn short_diffs_keep_their_prefixes() {
        let line = format!("qq{}", "m".repeat(40));
        let seq = char_seq(&[line.as_str()]);
        let diffs = vec![SequenceDiff::new(2..42, 2..42)];
        let kept = remove_very_short_matching_text_between_long_diffs(&seq, &seq, diffs.clone());
        assert_eq!(kept, diffs);
    }

    #[test]
    fn line_break_counting() {
        assert_eq!(count_line_breaks(&[]), 0);
        assert_eq!(count_line_breaks(&[0x61, 0x62]), 0);
        assert_eq!(count_line_breaks(&[0x61, 0x0A, 0x62]), 1);
        assert_eq!(count_line_breaks(&[0x61, 0x0D, 0x0A, 0x62]), 1);
        assert_eq!(count_line_breaks(&[0x0D, 0x0A, 0x0D, 0x62, 0x0A]), 3);
    }
}
