#![no_main]

use libfuzzer_sys::arbitrary;
use libfuzzer_sys::fuzz_target;
use makini_diff::{sources, DiffOptions, LinesDiff};

#[derive(arbitrary::Arbitrary, Debug)]
struct Input<'a> {
    original: &'a str,
    modified: &'a str,
    ignore_trim_whitespace: bool,
    extend_to_subwords: bool,
}

/// Drives the whole pipeline on arbitrary text with every option
/// combination and checks the output invariants:
/// - changes are sorted and non-overlapping on both sides
/// - line ranges are well-formed and within the documents
/// - identical inputs produce no changes
fn do_fuzz(input: Input<'_>) {
    if input.original.len() > 10_000 || input.modified.len() > 10_000 {
        return;
    }
    let original = sources::lines(input.original);
    let modified = sources::lines(input.modified);
    let options = DiffOptions {
        ignore_trim_whitespace: input.ignore_trim_whitespace,
        max_computation_time_ms: 0,
        compute_moves: false,
        extend_to_subwords: input.extend_to_subwords,
    };

    let diff = LinesDiff::compute(&original, &modified, &options);
    assert!(diff.moves.is_empty());
    assert!(!diff.hit_timeout);
    if input.original == input.modified {
        assert!(diff.changes.is_empty());
    }

    let mut last_original_end = 0;
    let mut last_modified_end = 0;
    for change in &diff.changes {
        assert!(change.original.start <= change.original.end);
        assert!(change.modified.start <= change.modified.end);
        assert!(change.original.end <= original.len() as u32 + 1);
        assert!(change.modified.end <= modified.len() as u32 + 1);
        assert!(change.original.start >= last_original_end);
        assert!(change.modified.start >= last_modified_end);
        last_original_end = change.original.end;
        last_modified_end = change.modified.end;
    }
}

fuzz_target!(|input: Input<'_>| {
    do_fuzz(input);
});
