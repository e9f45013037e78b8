use std::ops::Index;

use ahash::RandomState;
use hashbrown::raw::RawTable;

/// Identity of an interned line.
///
/// Ids are dense and sequential: the n-th distinct string interned receives
/// id `n`, so all ids live in `[0, len)`. Two ids are equal iff the strings
/// that produced them are byte-for-byte equal. The hash only ever selects a
/// bucket and never leaks into the id, which makes the ids collision-free by
/// construction.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[repr(transparent)]
pub struct LineId(pub u32);

/// Interns line contents for the duration of one diff invocation.
///
/// The interner borrows the line strings; it must outlive the sequences that
/// hold ids handed out by it.
pub struct Interner<'a> {
    strings: Vec<&'a str>,
    table: RawTable<LineId>,
    hasher: RandomState,
}

impl<'a> Interner<'a> {
    /// Creates an interner sized for `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Interner {
            strings: Vec::with_capacity(capacity),
            table: RawTable::with_capacity(capacity),
            hasher: RandomState::new(),
        }
    }

    /// Returns the id of `string`, assigning the next sequential id if the
    /// string has not been seen before.
    pub fn intern(&mut self, string: &'a str) -> LineId {
        let hash = self.hasher.hash_one(string);
        if let Some(&id) = self
            .table
            .get(hash, |&it| self.strings[it.0 as usize] == string)
        {
            id
        } else {
            let id = LineId(self.strings.len() as u32);
            self.table.insert(hash, id, |&id| {
                self.hasher.hash_one(self.strings[id.0 as usize])
            });
            self.strings.push(string);
            id
        }
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> u32 {
        self.strings.len() as u32
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Index<LineId> for Interner<'_> {
    type Output = str;
    fn index(&self, id: LineId) -> &Self::Output {
        self.strings[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::Interner;

    #[test]
    fn ids_are_sequential_and_collision_free() {
        let lines = ["fn main() {", "}", "", "fn main() {", ""];
        let mut interner = Interner::new(lines.len());
        let ids: Vec<_> = lines.iter().map(|line| interner.intern(line)).collect();
        assert_eq!(interner.len(), 3);
        assert_eq!(ids[0], ids[3]);
        assert_eq!(ids[2], ids[4]);
        assert_ne!(ids[0], ids[1]);
        // ids are handed out in first-seen order
        assert_eq!(ids[0].0, 0);
        assert_eq!(ids[1].0, 1);
        assert_eq!(ids[2].0, 2);
        assert_eq!(&interner[ids[1]], "}");
    }

    #[test]
    fn byte_equality_matches_id_equality() {
        let mut interner = Interner::new(4);
        let a = interner.intern("a ");
        let b = interner.intern("a");
        let c = interner.intern("a ");
        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
