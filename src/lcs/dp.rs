//! Dense dynamic-programming LCS.
//!
//! Exact `O(len1 · len2)` alignment with two twists over the textbook
//! recurrence: an optional per-match reward, and a bonus for extending a run
//! of consecutive diagonal steps, which makes the backtracked alignment
//! prefer contiguous matches over scattered ones.

use crate::lcs::{DiffResult, SequenceDiff};
use crate::sequence::Sequence;
use crate::util::Deadline;

const DIAGONAL: u8 = 3;
const HORIZONTAL: u8 = 1;
const VERTICAL: u8 = 2;

struct Grid<T> {
    width: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            data: vec![T::default(); width * height],
        }
    }

    fn get(&self, x: usize, y: usize) -> T {
        self.data[x + y * self.width]
    }

    fn set(&mut self, x: usize, y: usize, value: T) {
        self.data[x + y * self.width] = value;
    }
}

/// Computes an exact LCS alignment of `seq1` against `seq2`.
///
/// `score` rewards an individual match at `(offset1, offset2)`; without it
/// every match is worth `1.0`. The deadline is polled once per row; on
/// expiry a single full-range diff is returned with `hit_timeout` set.
pub fn diff<S: Sequence + ?Sized>(
    seq1: &S,
    seq2: &S,
    deadline: &Deadline,
    score: Option<&dyn Fn(u32, u32) -> f64>,
) -> DiffResult {
    if seq1.len() == 0 || seq2.len() == 0 {
        return DiffResult::trivial(seq1.len(), seq2.len());
    }

    let len1 = seq1.len() as usize;
    let len2 = seq2.len() as usize;
    let mut lcs_lengths = Grid::<f64>::new(len1, len2);
    let mut directions = Grid::<u8>::new(len1, len2);
    let mut run_lengths = Grid::<u32>::new(len1, len2);

    for s1 in 0..len1 {
        if !deadline.is_valid() {
            return DiffResult::trivial_timed_out(seq1.len(), seq2.len());
        }
        for s2 in 0..len2 {
            let horizontal = if s1 == 0 { 0.0 } else { lcs_lengths.get(s1 - 1, s2) };
            let vertical = if s2 == 0 { 0.0 } else { lcs_lengths.get(s1, s2 - 1) };

            let diagonal = if seq1.element(s1 as u32) == seq2.element(s2 as u32) {
                let mut value = if s1 == 0 || s2 == 0 {
                    0.0
                } else {
                    lcs_lengths.get(s1 - 1, s2 - 1)
                };
                if s1 > 0 && s2 > 0 && directions.get(s1 - 1, s2 - 1) == DIAGONAL {
                    value += f64::from(run_lengths.get(s1 - 1, s2 - 1));
                }
                value + score.map_or(1.0, |score| score(s1 as u32, s2 as u32))
            } else {
                -1.0
            };

            let best = horizontal.max(vertical).max(diagonal);
            if best == diagonal {
                let previous_run = if s1 > 0 && s2 > 0 && directions.get(s1 - 1, s2 - 1) == DIAGONAL
                {
                    run_lengths.get(s1 - 1, s2 - 1)
                } else {
                    0
                };
                run_lengths.set(s1, s2, previous_run + 1);
                directions.set(s1, s2, DIAGONAL);
            } else if best == horizontal {
                run_lengths.set(s1, s2, 0);
                directions.set(s1, s2, HORIZONTAL);
            } else {
                run_lengths.set(s1, s2, 0);
                directions.set(s1, s2, VERTICAL);
            }
            lcs_lengths.set(s1, s2, best);
        }
    }

    // only the direction matrix is needed below
    drop(lcs_lengths);
    drop(run_lengths);

    let mut diffs = Vec::new();
    let mut last_aligned1 = len1 as i64;
    let mut last_aligned2 = len2 as i64;
    let mut s1 = len1 as i64 - 1;
    let mut s2 = len2 as i64 - 1;
    while s1 >= 0 && s2 >= 0 {
        match directions.get(s1 as usize, s2 as usize) {
            DIAGONAL => {
                report_aligned(&mut diffs, s1, s2, &mut last_aligned1, &mut last_aligned2);
                s1 -= 1;
                s2 -= 1;
            }
            HORIZONTAL => s1 -= 1,
            _ => s2 -= 1,
        }
    }
    report_aligned(&mut diffs, -1, -1, &mut last_aligned1, &mut last_aligned2);
    diffs.reverse();
    DiffResult {
        diffs,
        hit_timeout: false,
    }
}

/// Emits the region between the previous aligned anchor and `(s1, s2)`
/// unless the anchors are adjacent.
fn report_aligned(
    diffs: &mut Vec<SequenceDiff>,
    s1: i64,
    s2: i64,
    last_aligned1: &mut i64,
    last_aligned2: &mut i64,
) {
    if s1 + 1 != *last_aligned1 || s2 + 1 != *last_aligned2 {
        diffs.push(SequenceDiff::new(
            (s1 + 1) as u32..*last_aligned1 as u32,
            (s2 + 1) as u32..*last_aligned2 as u32,
        ));
    }
    *last_aligned1 = s1;
    *last_aligned2 = s2;
}
