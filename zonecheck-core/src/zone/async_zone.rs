//! The asynchronous zone (§4.2.1): each automaton clock is associated with a
//! per-process reference clock, so that inter-process clock differences that
//! never participate in a synchronization need not be kept tight. `RefZone`
//! mirrors [`super::Zone`]'s operations over the reference-clock DBM and adds a
//! `synchronize` operator for joint actions.

use crate::dbm::{Bound, Dbm, DbmStatus};

/// A zone over reference clocks: clock `0` is the global reference, clocks
/// `1..=num_refs` are the per-process reference clocks, and the remaining
/// clocks are automaton clocks, each assigned to exactly one reference clock.
#[derive(Debug, Clone)]
pub struct RefZone {
    dbm: Dbm,
    /// `ref_of[c]` is the reference clock of automaton clock `c`; `ref_of[r] = r`
    /// for reference clocks themselves.
    ref_of: Vec<usize>,
    num_refs: usize,
}

impl RefZone {
    /// Builds a reference-clock zone at the zero valuation.
    ///
    /// `ref_of` must have one entry per clock (dimension `dbm_dim`), with
    /// `ref_of[0] == 0` and `ref_of[r] == r` for `r in 1..=num_refs`.
    pub fn zero(ref_of: Vec<usize>, num_refs: usize) -> RefZone {
        let dim = ref_of.len();
        assert_eq!(ref_of[0], 0);
        for r in 1..=num_refs {
            assert_eq!(ref_of[r], r, "reference clocks must map to themselves");
        }
        RefZone {
            dbm: Dbm::zero(dim),
            ref_of,
            num_refs,
        }
    }

    /// Dimension of the underlying DBM.
    pub fn dim(&self) -> usize {
        self.dbm.dim()
    }

    /// Number of per-process reference clocks.
    pub fn num_refs(&self) -> usize {
        self.num_refs
    }

    /// Reference clock owning automaton clock `c`.
    pub fn reference_of(&self, c: usize) -> usize {
        self.ref_of[c]
    }

    /// Read-only access to the underlying DBM.
    pub fn dbm(&self) -> &Dbm {
        &self.dbm
    }

    /// True iff the zone contains no valuation.
    pub fn is_empty(&self) -> bool {
        self.dbm.is_empty_0()
    }

    /// Time elapse: open up every reference clock (and, transitively via
    /// tightening, the automaton clocks tied to it).
    pub fn open_up(&mut self) {
        for r in 1..=self.num_refs {
            // Opening a reference clock must also open every automaton clock
            // pinned to it, since their difference to the reference is fixed.
            for (c, &rc) in self.ref_of.iter().enumerate() {
                if rc == r {
                    self.dbm.constrain(c, 0, Bound::INFINITY);
                }
            }
        }
        self.dbm.open_up();
    }

    /// Intersects with a single clock constraint, tightening only the affected
    /// reference-clock neighborhood.
    pub fn constrain(&mut self, i: usize, j: usize, bound: Bound) -> DbmStatus {
        let status = self.dbm.constrain(i, j, bound);
        if status == DbmStatus::Empty {
            self.dbm = Dbm::empty(self.dbm.dim());
        }
        status
    }

    /// Forces a set of reference clocks to be pairwise equal, used when
    /// processes synchronize on a joint action and their local notions of "now"
    /// must be merged.
    ///
    /// Returns [`DbmStatus::Empty`] if the resulting zone has no valuation
    /// (surfaced to the transition system as `ClocksEmptySync`).
    pub fn synchronize(&mut self, refs: &[usize]) -> DbmStatus {
        for w in refs.windows(2) {
            let (a, b) = (w[0], w[1]);
            if self.dbm.constrain(a, b, Bound::LE_ZERO) == DbmStatus::Empty {
                self.dbm = Dbm::empty(self.dbm.dim());
                return DbmStatus::Empty;
            }
            if self.dbm.constrain(b, a, Bound::LE_ZERO) == DbmStatus::Empty {
                self.dbm = Dbm::empty(self.dbm.dim());
                return DbmStatus::Empty;
            }
        }
        DbmStatus::NonEmpty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchronize_equal_refs_stays_non_empty() {
        // dim 3: 0 = global ref, 1 and 2 are per-process reference clocks.
        let mut z = RefZone::zero(vec![0, 1, 2], 2);
        assert_eq!(z.synchronize(&[1, 2]), DbmStatus::NonEmpty);
        assert!(!z.is_empty());
    }

    #[test]
    fn synchronize_after_diverging_elapse_can_still_succeed_at_zero() {
        let mut z = RefZone::zero(vec![0, 1, 2], 2);
        z.open_up();
        // Both references can still be forced equal at the shared zero point.
        assert_eq!(z.synchronize(&[1, 2]), DbmStatus::NonEmpty);
    }
}
