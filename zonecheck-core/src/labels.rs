//! Accepting-label bitsets (§9 "Boost dynamic bitset for labels"): a fixed-width
//! bitset with lexical comparison and named-element formatting, backed by a
//! `u64` word vector rather than a dependency on an external bitset crate.

use std::fmt;

/// A set of label identifiers in `[0, width)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelSet {
    words: Vec<u64>,
    width: usize,
}

impl LabelSet {
    /// An empty label set over `width` labels.
    pub fn empty(width: usize) -> LabelSet {
        LabelSet {
            words: vec![0; width.div_ceil(64)],
            width,
        }
    }

    /// Sets label `i`.
    pub fn insert(&mut self, i: usize) {
        debug_assert!(i < self.width);
        self.words[i / 64] |= 1 << (i % 64);
    }

    /// True iff label `i` is set.
    pub fn contains(&self, i: usize) -> bool {
        debug_assert!(i < self.width);
        self.words[i / 64] & (1 << (i % 64)) != 0
    }

    /// True iff no label is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// True iff every label set in `other` is also set in `self`.
    pub fn is_superset_of(&self, other: &LabelSet) -> bool {
        debug_assert_eq!(self.width, other.width);
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| (a & b) == *b)
    }

    /// True iff `self` and `other` share at least one label.
    pub fn intersects(&self, other: &LabelSet) -> bool {
        debug_assert_eq!(self.width, other.width);
        self.words.iter().zip(other.words.iter()).any(|(a, b)| a & b != 0)
    }

    /// Union in place.
    pub fn union_with(&mut self, other: &LabelSet) {
        debug_assert_eq!(self.width, other.width);
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
    }

    /// Lexical comparison over the word vector, most-significant word first.
    pub fn lexicographic_cmp(&self, other: &LabelSet) -> std::cmp::Ordering {
        self.words
            .iter()
            .rev()
            .cmp(other.words.iter().rev())
    }
}

/// Formats a label set against a name table, e.g. `{goal, error}`.
pub fn format_with_names(set: &LabelSet, names: &[String]) -> String {
    let mut parts = Vec::new();
    for (i, name) in names.iter().enumerate() {
        if set.contains(i) {
            parts.push(name.clone());
        }
    }
    format!("{{{}}}", parts.join(", "))
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = (0..self.width)
            .rev()
            .map(|i| if self.contains(i) { '1' } else { '0' })
            .collect();
        write!(f, "{bits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut s = LabelSet::empty(70);
        s.insert(0);
        s.insert(65);
        assert!(s.contains(0));
        assert!(s.contains(65));
        assert!(!s.contains(1));
    }

    #[test]
    fn superset_and_intersects() {
        let mut a = LabelSet::empty(4);
        a.insert(0);
        a.insert(1);
        let mut b = LabelSet::empty(4);
        b.insert(0);
        assert!(a.is_superset_of(&b));
        assert!(a.intersects(&b));
        let mut c = LabelSet::empty(4);
        c.insert(2);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn formatting_lists_set_names() {
        let mut s = LabelSet::empty(3);
        s.insert(0);
        s.insert(2);
        let names = vec!["goal".to_string(), "mid".to_string(), "error".to_string()];
        assert_eq!(format_with_names(&s, &names), "{goal, error}");
    }
}
