//! Space-efficient forward variant of Myers' O(ND) algorithm.
//!
//! Tracks the furthest-reaching x per diagonal `k` and, alongside it, a
//! linked path of snakes (runs of matching elements) so the edit script can
//! be reconstructed without a full matrix. Diagonals are in `[-d, +d]`; the
//! negative half is biased into a second array.

use crate::lcs::{DiffResult, SequenceDiff};
use crate::sequence::Sequence;
use crate::util::Deadline;

/// Growable array indexed by a possibly negative diagonal. Unset slots read
/// as the default value.
struct DiagonalVec<T> {
    positive: Vec<T>,
    negative: Vec<T>,
}

impl<T: Copy + Default> DiagonalVec<T> {
    fn new() -> Self {
        DiagonalVec {
            positive: Vec::new(),
            negative: Vec::new(),
        }
    }

    fn get(&self, k: i64) -> T {
        if k < 0 {
            let idx = (-k - 1) as usize;
            self.negative.get(idx).copied().unwrap_or_default()
        } else {
            self.positive.get(k as usize).copied().unwrap_or_default()
        }
    }

    fn set(&mut self, k: i64, value: T) {
        let (vec, idx) = if k < 0 {
            (&mut self.negative, (-k - 1) as usize)
        } else {
            (&mut self.positive, k as usize)
        };
        if idx >= vec.len() {
            vec.resize(idx + 1, T::default());
        }
        vec[idx] = value;
    }
}

/// One run of matching elements, linked to the path that led to it. Nodes
/// live in an arena; `prev` is an arena index.
#[derive(Clone, Copy)]
struct Snake {
    prev: Option<u32>,
    x: u32,
    y: u32,
    length: u32,
}

/// Computes the diff of `seq1` against `seq2` in `O((N+M)·D)` time and
/// `O(N+M+D)` space.
///
/// The deadline is polled once per edit-distance step; on expiry a single
/// full-range diff is returned with `hit_timeout` set.
pub fn diff<S: Sequence + ?Sized>(seq1: &S, seq2: &S, deadline: &Deadline) -> DiffResult {
    if seq1.len() == 0 || seq2.len() == 0 {
        return DiffResult::trivial(seq1.len(), seq2.len());
    }

    let len1 = i64::from(seq1.len());
    let len2 = i64::from(seq2.len());

    let x_after_snake = |mut x: i64, mut y: i64| {
        while x < len1 && y >= 0 && y < len2 && seq1.element(x as u32) == seq2.element(y as u32) {
            x += 1;
            y += 1;
        }
        x
    };

    let mut arena: Vec<Snake> = Vec::new();
    let push_snake = |arena: &mut Vec<Snake>, snake: Snake| -> Option<u32> {
        arena.push(snake);
        Some((arena.len() - 1) as u32)
    };

    let mut v = DiagonalVec::<i64>::new();
    let mut paths = DiagonalVec::<Option<u32>>::new();
    let first_x = x_after_snake(0, 0);
    v.set(0, first_x);
    let first_path = if first_x == 0 {
        None
    } else {
        push_snake(
            &mut arena,
            Snake {
                prev: None,
                x: 0,
                y: 0,
                length: first_x as u32,
            },
        )
    };
    paths.set(0, first_path);

    let mut d: i64 = 0;
    let final_k;
    'search: loop {
        d += 1;
        if !deadline.is_valid() {
            return DiffResult::trivial_timed_out(seq1.len(), seq2.len());
        }
        // diagonals outside these bounds cannot influence the result
        let lower_bound = -(d.min(len2 + d % 2));
        let upper_bound = d.min(len1 + d % 2);
        let mut k = lower_bound;
        while k <= upper_bound {
            // x reachable by taking an element from seq2 (vertical step)
            let max_x_top = if k == upper_bound { -1 } else { v.get(k + 1) };
            // x reachable by dropping an element from seq1 (horizontal step)
            let max_x_left = if k == lower_bound { -1 } else { v.get(k - 1) + 1 };
            let x = max_x_top.max(max_x_left).min(len1);
            let y = x - k;
            if x > len1 || y > len2 {
                k += 2;
                continue;
            }
            let new_max_x = x_after_snake(x, y);
            v.set(k, new_max_x);
            let last_path = if x == max_x_top {
                paths.get(k + 1)
            } else {
                paths.get(k - 1)
            };
            let path = if new_max_x != x {
                push_snake(
                    &mut arena,
                    Snake {
                        prev: last_path,
                        x: x as u32,
                        y: y as u32,
                        length: (new_max_x - x) as u32,
                    },
                )
            } else {
                last_path
            };
            paths.set(k, path);
            if v.get(k) == len1 && v.get(k) - k == len2 {
                final_k = k;
                break 'search;
            }
            k += 2;
        }
    }

    // walk the snake path backwards, emitting a diff between consecutive
    // matching runs
    let mut diffs = Vec::new();
    let mut path = paths.get(final_k);
    let mut last_aligned1 = len1;
    let mut last_aligned2 = len2;
    loop {
        let (end_x, end_y) = match path {
            Some(idx) => {
                let snake = arena[idx as usize];
                (
                    i64::from(snake.x + snake.length),
                    i64::from(snake.y + snake.length),
                )
            }
            None => (0, 0),
        };
        if end_x != last_aligned1 || end_y != last_aligned2 {
            diffs.push(SequenceDiff::new(
                end_x as u32..last_aligned1 as u32,
                end_y as u32..last_aligned2 as u32,
            ));
        }
        match path {
            Some(idx) => {
                let snake = arena[idx as usize];
                last_aligned1 = i64::from(snake.x);
                last_aligned2 = i64::from(snake.y);
                path = snake.prev;
            }
            None => break,
        }
    }
    diffs.reverse();
    DiffResult {
        diffs,
        hit_timeout: false,
    }
}
