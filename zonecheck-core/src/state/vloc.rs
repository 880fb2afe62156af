//! Location tuples (`vloc`): one location identifier per process.

use smallvec::SmallVec;
use std::fmt;

/// Identifier of a location within the global location table.
pub type LocId = u32;

/// A fixed-length tuple of per-process location identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vloc {
    locs: SmallVec<[LocId; 4]>,
}

impl Vloc {
    /// Builds a vloc from one location id per process, in process order.
    pub fn new(locs: impl IntoIterator<Item = LocId>) -> Vloc {
        Vloc {
            locs: locs.into_iter().collect(),
        }
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.locs.len()
    }

    /// True iff there are no processes (degenerate, only used in tests).
    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Location of process `pid`.
    pub fn get(&self, pid: usize) -> LocId {
        self.locs[pid]
    }

    /// A copy of `self` with process `pid` moved to `loc`.
    pub fn with(&self, pid: usize, loc: LocId) -> Vloc {
        let mut locs = self.locs.clone();
        locs[pid] = loc;
        Vloc { locs }
    }

    /// Iterates over `(pid, loc)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, LocId)> + '_ {
        self.locs.iter().copied().enumerate()
    }
}

impl fmt::Display for Vloc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, l) in self.locs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{l}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_a_single_process() {
        let v = Vloc::new([0, 1, 2]);
        let w = v.with(1, 9);
        assert_eq!(w.get(0), 0);
        assert_eq!(w.get(1), 9);
        assert_eq!(w.get(2), 2);
        assert_eq!(v.get(1), 1, "original vloc is untouched");
    }

    #[test]
    fn equal_vlocs_hash_equal() {
        let a = Vloc::new([0, 1]);
        let b = Vloc::new([0, 1]);
        assert_eq!(a, b);
    }
}
