#![warn(missing_docs)]
//! Makini-diff is a careful (makini in Swahili) text-diff library for Rust.
//! Careful refers to the kind of output it aims for: diffs that read the way
//! a human would describe the change, not merely a minimal edit script.
//! Raw LCS output is post-processed so that changes snap to word and line
//! boundaries, tiny stuttering matches disappear, and each changed line
//! range carries the exact character edits inside it.
//!
//! The pipeline was built for interactive editors and diff viewers: it runs
//! within a caller-supplied time budget on inputs up to tens of thousands of
//! lines and degrades gracefully (coarser diffs, never an error) when the
//! budget runs out.
//!
//! # API Overview
//!
//! ## Preparing the input
//!
//! A diff is computed between two documents given as slices of lines
//! without their terminators. If you start from a string, [`sources::lines`]
//! splits it with the conventions the diff expects (a trailing newline
//! produces a trailing empty line; a `'\r'` before the `'\n'` stays on its
//! line):
//!
//! ```
//! let before = makini_diff::sources::lines("abc\ndef\n");
//! assert_eq!(before, ["abc", "def", ""]);
//! ```
//!
//! ## Computing the diff
//!
//! [`LinesDiff::compute`] runs the whole pipeline: line alignment, heuristic
//! optimization, and character-level refinement of every changed region.
//! The result is a list of [`DetailedLineRangeMapping`]s, each pairing a
//! line range in the original document with a line range in the modified
//! one and carrying the character-level [`RangeMapping`]s inside it.
//!
//! ```
//! use makini_diff::{DiffOptions, LinesDiff};
//!
//! let original = makini_diff::sources::lines("alpha beta gamma");
//! let modified = makini_diff::sources::lines("alpha BETA gamma");
//! let diff = LinesDiff::compute(&original, &modified, &DiffOptions::default());
//!
//! assert_eq!(diff.changes.len(), 1);
//! let inner = &diff.changes[0].inner_changes[0];
//! // only the changed word is reported, snapped to its token boundaries
//! assert_eq!((inner.original.start.column, inner.original.end.column), (7, 11));
//! assert!(!diff.hit_timeout);
//! ```
//!
//! Whitespace-only differences are reported as character-level changes by
//! default; with [`DiffOptions::ignore_trim_whitespace`] they vanish
//! entirely:
//!
//! ```
//! use makini_diff::{DiffOptions, LinesDiff};
//!
//! let original = ["x", "  y", "z"];
//! let modified = ["x", "y", "z"];
//! let options = DiffOptions {
//!     ignore_trim_whitespace: true,
//!     ..DiffOptions::default()
//! };
//! assert!(LinesDiff::compute(&original, &modified, &options).changes.is_empty());
//! ```
//!
//! ## Lower layers
//!
//! The building blocks are exported for advanced use: the [`Sequence`]
//! abstraction with its [`LineSequence`]/[`CharSequence`] implementations,
//! the two LCS engines in [`lcs`], and the heuristic passes in [`optimize`].

mod chars;
mod intern;
mod mapping;
mod refine;
mod sequence;
mod text;
mod util;

pub mod lcs;
pub mod optimize;
pub mod sources;


pub use chars::{BoundaryPreference, CharSequence};
pub use intern::{Interner, LineId};
pub use lcs::{DiffResult, SequenceDiff};
pub use mapping::{
    CharRange, DetailedLineRangeMapping, LineRange, MovedText, Position, RangeMapping,
};
pub use sequence::{LineSequence, Sequence};
pub use text::{is_whitespace, utf16_len};
pub use util::Deadline;

use lcs::{dp, myers};

/// Options for one diff invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    /// When `true`, lines differing only in surrounding whitespace count as
    /// equal and produce no changes. When `false`, such lines produce
    /// character-level changes covering the whitespace.
    pub ignore_trim_whitespace: bool,
    /// Time budget in milliseconds for the whole call; `0` disables the
    /// deadline. When the budget runs out the affected regions are reported
    /// as one coarse change and
    /// [`hit_timeout`](LinesDiff::hit_timeout) is set.
    pub max_computation_time_ms: u64,
    /// Accepted for API compatibility; moved-block detection is not
    /// implemented and [`moves`](LinesDiff::moves) is always empty.
    pub compute_moves: bool,
    /// Also extend changes over camelCase sub-words during character
    /// refinement.
    pub extend_to_subwords: bool,
}

/// The difference between two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesDiff {
    /// Changed regions, sorted by original start line, non-overlapping on
    /// both sides.
    pub changes: Vec<DetailedLineRangeMapping>,
    /// Moved blocks; always empty (see
    /// [`DiffOptions::compute_moves`]).
    pub moves: Vec<MovedText>,
    /// Whether any stage of the pipeline ran out of time and produced a
    /// coarse result.
    pub hit_timeout: bool,
}

impl LinesDiff {
    /// Computes the diff that turns `original_lines` into `modified_lines`.
    ///
    /// Both slices must contain at least one line; split with
    /// [`sources::lines`] to get that shape from raw text.
    pub fn compute(
        original_lines: &[&str],
        modified_lines: &[&str],
        options: &DiffOptions,
    ) -> LinesDiff {
        assert!(
            !original_lines.is_empty() && !modified_lines.is_empty(),
            "a document has at least one line"
        );

        if original_lines.len() <= 1 && original_lines == modified_lines {
            return LinesDiff {
                changes: Vec::new(),
                moves: Vec::new(),
                hit_timeout: false,
            };
        }

        if (original_lines.len() == 1 && original_lines[0].is_empty())
            || (modified_lines.len() == 1 && modified_lines[0].is_empty())
        {
            return LinesDiff {
                changes: vec![DetailedLineRangeMapping {
                    original: LineRange::new(1, original_lines.len() as u32 + 1),
                    modified: LineRange::new(1, modified_lines.len() as u32 + 1),
                    inner_changes: vec![RangeMapping {
                        original: CharRange::new(
                            1,
                            1,
                            original_lines.len() as u32,
                            text::utf16_len(original_lines[original_lines.len() - 1]) + 1,
                        ),
                        modified: CharRange::new(
                            1,
                            1,
                            modified_lines.len() as u32,
                            text::utf16_len(modified_lines[modified_lines.len() - 1]) + 1,
                        ),
                    }],
                }],
                moves: Vec::new(),
                hit_timeout: false,
            };
        }

        let deadline = Deadline::new(options.max_computation_time_ms);
        let consider_whitespace = !options.ignore_trim_whitespace;

        let mut interner = Interner::new(original_lines.len() + modified_lines.len());
        let sequence1 = LineSequence::new(original_lines, &mut interner);
        let sequence2 = LineSequence::new(modified_lines, &mut interner);

        let result = if sequence1.len() + sequence2.len() < lcs::DP_LINE_LIMIT {
            // exact alignment for small inputs, rewarding matches of longer
            // lines so that one substantial line wins over several blank ones
            let score = |offset1: u32, offset2: u32| -> f64 {
                if original_lines[offset1 as usize] == modified_lines[offset2 as usize] {
                    if modified_lines[offset2 as usize].is_empty() {
                        0.1
                    } else {
                        1.0 + f64::from(text::utf16_len(modified_lines[offset2 as usize])).ln_1p()
                    }
                } else {
                    0.99
                }
            };
            dp::diff(&sequence1, &sequence2, &deadline, Some(&score))
        } else {
            myers::diff(&sequence1, &sequence2, &deadline)
        };
        let mut hit_timeout = result.hit_timeout;

        let mut line_diffs = optimize::optimize_sequence_diffs(&sequence1, &sequence2, result.diffs);
        line_diffs = optimize::remove_very_short_matching_lines_between_diffs(&sequence1, line_diffs);

        let mut alignments: Vec<RangeMapping> = Vec::new();
        let mut seq1_last_start = 0u32;
        let mut seq2_last_start = 0u32;
        for diff in &line_diffs {
            debug_assert_eq!(
                diff.seq1.start - seq1_last_start,
                diff.seq2.start - seq2_last_start
            );
            let equal_lines = diff.seq1.start - seq1_last_start;
            if consider_whitespace {
                scan_for_whitespace_changes(
                    original_lines,
                    modified_lines,
                    seq1_last_start,
                    seq2_last_start,
                    equal_lines,
                    &deadline,
                    options.extend_to_subwords,
                    &mut alignments,
                    &mut hit_timeout,
                );
            }

            let refined = refine::refine_diff(
                original_lines,
                modified_lines,
                diff,
                &deadline,
                consider_whitespace,
                options.extend_to_subwords,
            );
            hit_timeout |= refined.hit_timeout;
            alignments.extend(refined.mappings);

            seq1_last_start = diff.seq1.end;
            seq2_last_start = diff.seq2.end;
        }
        if consider_whitespace {
            scan_for_whitespace_changes(
                original_lines,
                modified_lines,
                seq1_last_start,
                seq2_last_start,
                original_lines.len() as u32 - seq1_last_start,
                &deadline,
                options.extend_to_subwords,
                &mut alignments,
                &mut hit_timeout,
            );
        }

        let changes = mapping::line_range_mappings_from_range_mappings(
            &alignments,
            original_lines,
            modified_lines,
        );
        debug_assert!(changes_are_sorted_and_disjoint(&changes));

        LinesDiff {
            changes,
            moves: Vec::new(),
            hit_timeout,
        }
    }
}

/// Re-diffs element-equal line pairs whose raw text still differs; with the
/// trimmed line identity those are exactly the whitespace-only edits.
#[allow(clippy::too_many_arguments)]
fn scan_for_whitespace_changes(
    original_lines: &[&str],
    modified_lines: &[&str],
    seq1_start: u32,
    seq2_start: u32,
    equal_lines: u32,
    deadline: &Deadline,
    extend_to_subwords: bool,
    alignments: &mut Vec<RangeMapping>,
    hit_timeout: &mut bool,
) {
    for offset in 0..equal_lines {
        let seq1_offset = seq1_start + offset;
        let seq2_offset = seq2_start + offset;
        if original_lines[seq1_offset as usize] != modified_lines[seq2_offset as usize] {
            let refined = refine::refine_diff(
                original_lines,
                modified_lines,
                &SequenceDiff::new(seq1_offset..seq1_offset + 1, seq2_offset..seq2_offset + 1),
                deadline,
                true,
                extend_to_subwords,
            );
            *hit_timeout |= refined.hit_timeout;
            alignments.extend(refined.mappings);
        }
    }
}

fn changes_are_sorted_and_disjoint(changes: &[DetailedLineRangeMapping]) -> bool {
    changes.windows(2).all(|pair| {
        pair[0].original.end <= pair[1].original.start
            && pair[0].modified.end <= pair[1].modified.start
    })
}
