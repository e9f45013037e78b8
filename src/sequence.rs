use std::ops::Range;

use crate::intern::{Interner, LineId};
use crate::text;

/// Abstract sequence the LCS algorithms and the optimizer passes operate on.
///
/// `element` is a cheap identity. `is_strongly_equal` may be stricter: the
/// line implementation compares the raw line text while elements are computed
/// from the trimmed form, which keeps the shifting passes from sliding a diff
/// across whitespace-only matches.
pub trait Sequence {
    /// Number of elements.
    fn len(&self) -> u32;

    /// Whether the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the element at `offset`.
    fn element(&self, offset: u32) -> u32;

    /// Byte-exact equality of two elements. At least as strict as `element`
    /// equality.
    fn is_strongly_equal(&self, offset1: u32, offset2: u32) -> bool;

    /// Whether [`boundary_score`](Sequence::boundary_score) carries
    /// information for this sequence.
    fn has_boundary_score(&self) -> bool {
        false
    }

    /// How desirable `offset` is as the start or end of a change. Higher is
    /// better. `offset` ranges over `0..=len`.
    fn boundary_score(&self, _offset: u32) -> i32 {
        0
    }
}

/// View over a line array.
///
/// Element identity is the interned *trimmed* line, so lines differing only
/// in surrounding whitespace align with each other; the orchestrator
/// recovers whitespace-only edits afterwards by scanning the aligned regions.
/// Strong equality compares the raw lines.
pub struct LineSequence<'a> {
    lines: &'a [&'a str],
    ids: Vec<LineId>,
}

impl<'a> LineSequence<'a> {
    /// Interns every line of `lines` and records the resulting ids.
    pub fn new(lines: &'a [&'a str], interner: &mut Interner<'a>) -> Self {
        let ids = lines
            .iter()
            .map(|line| interner.intern(text::trim(line)))
            .collect();
        LineSequence { lines, ids }
    }

    /// The covered lines joined with `'\n'`.
    pub fn text(&self, range: Range<u32>) -> String {
        self.lines[range.start as usize..range.end as usize].join("\n")
    }
}

impl Sequence for LineSequence<'_> {
    fn len(&self) -> u32 {
        self.ids.len() as u32
    }

    fn element(&self, offset: u32) -> u32 {
        self.ids[offset as usize].0
    }

    fn is_strongly_equal(&self, offset1: u32, offset2: u32) -> bool {
        self.lines[offset1 as usize] == self.lines[offset2 as usize]
    }

    fn has_boundary_score(&self) -> bool {
        true
    }

    fn boundary_score(&self, offset: u32) -> i32 {
        let indent_before = if offset == 0 {
            0
        } else {
            text::indentation(self.lines[offset as usize - 1])
        };
        let indent_after = if offset == self.len() {
            0
        } else {
            text::indentation(self.lines[offset as usize])
        };
        1000 - (indent_before + indent_after) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{LineSequence, Sequence};
    use crate::intern::Interner;

    #[test]
    fn elements_use_trimmed_identity() {
        let lines = ["fn a() {", "    x;", "x;", "}"];
        let mut interner = Interner::new(lines.len());
        let seq = LineSequence::new(&lines, &mut interner);
        assert_eq!(seq.element(1), seq.element(2));
        assert!(!seq.is_strongly_equal(1, 2));
        assert!(seq.is_strongly_equal(1, 1));
    }

    #[test]
    fn boundary_score_prefers_flat_positions() {
        let lines = ["fn a() {", "    x;", "}", ""];
        let mut interner = Interner::new(lines.len());
        let seq = LineSequence::new(&lines, &mut interner);
        // between "    x;" and "}": indented on one side only
        assert_eq!(seq.boundary_score(2), 1000 - 4);
        // the sequence edges count as zero indentation
        assert_eq!(seq.boundary_score(0), 1000);
        assert_eq!(seq.boundary_score(4), 1000);
    }
}
