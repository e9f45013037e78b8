#![no_main]

use libfuzzer_sys::arbitrary;
use libfuzzer_sys::fuzz_target;
use makini_diff::lcs::dp;
use makini_diff::{optimize, sources, CharRange, CharSequence, Deadline, utf16_len};

#[derive(arbitrary::Arbitrary, Debug)]
struct Input<'a> {
    original: &'a str,
    modified: &'a str,
}

/// Runs the optimizer over a real LCS result and checks that a second run
/// is a no-op.
fn do_fuzz(input: Input<'_>) {
    if input.original.len() > 1000 || input.modified.len() > 1000 {
        return;
    }
    let original = sources::lines(input.original);
    let modified = sources::lines(input.modified);

    let slice1 = CharSequence::new(
        &original,
        CharRange::new(
            1,
            1,
            original.len() as u32,
            utf16_len(original[original.len() - 1]) + 1,
        ),
        true,
    );
    let slice2 = CharSequence::new(
        &modified,
        CharRange::new(
            1,
            1,
            modified.len() as u32,
            utf16_len(modified[modified.len() - 1]) + 1,
        ),
        true,
    );

    let result = dp::diff(&slice1, &slice2, &Deadline::infinite(), None);
    let once = optimize::optimize_sequence_diffs(&slice1, &slice2, result.diffs);
    let twice = optimize::optimize_sequence_diffs(&slice1, &slice2, once.clone());
    assert_eq!(once, twice);
}

fuzz_target!(|input: Input<'_>| {
    do_fuzz(input);
});
