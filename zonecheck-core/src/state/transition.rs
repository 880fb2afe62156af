//! Transitions: the edge-combination data produced by computing outgoing
//! edges from a state, before it is applied to produce a successor (§3.4,
//! §4.3 "vedge, sync id, and the four guard/invariant/reset containers").

use crate::dbm::{Constraint, ResetContainer};
use smallvec::SmallVec;

/// Identifier of a synchronisation vector, or `None` for an asynchronous
/// (single-process) transition.
pub type SyncId = Option<u32>;

/// The processes and local edges combined into one global transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vedge {
    /// `(process id, edge id)` pairs, one per synchronized process.
    edges: SmallVec<[(u32, u32); 4]>,
}

impl Vedge {
    /// Builds a vedge from its participating `(process, edge)` pairs.
    pub fn new(edges: impl IntoIterator<Item = (u32, u32)>) -> Vedge {
        Vedge {
            edges: edges.into_iter().collect(),
        }
    }

    /// Number of participating processes.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True iff no process participates (never produced by a well-formed model).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over the participating `(process, edge)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges.iter().copied()
    }
}

/// The clock side-effects and constraints a transition carries, gathered from
/// the source invariant, the edges' guards, the edges' resets, and the target
/// invariant, in that evaluation order (§4.3).
#[derive(Debug, Clone, Default)]
pub struct Transition {
    vedge: Option<Vedge>,
    sync: SyncId,
    src_invariant: Vec<Constraint>,
    guard: Vec<Constraint>,
    reset: ResetContainer,
    tgt_invariant: Vec<Constraint>,
}

impl Transition {
    /// An empty transition, built up by the successive `push_*`/`set_*` calls
    /// made while a model's outgoing edges are being resolved.
    pub fn new() -> Transition {
        Transition::default()
    }

    /// Assigns the combined vedge and synchronisation id.
    pub fn set_vedge(&mut self, vedge: Vedge, sync: SyncId) {
        self.vedge = Some(vedge);
        self.sync = sync;
    }

    /// The combined vedge, once resolved.
    pub fn vedge(&self) -> Option<&Vedge> {
        self.vedge.as_ref()
    }

    /// The synchronisation id, if this is a synchronized transition.
    pub fn sync(&self) -> SyncId {
        self.sync
    }

    /// Appends a constraint evaluated from the source locations' invariants.
    pub fn push_src_invariant(&mut self, c: Constraint) {
        self.src_invariant.push(c);
    }

    /// Appends a constraint evaluated from the participating edges' guards.
    pub fn push_guard(&mut self, c: Constraint) {
        self.guard.push(c);
    }

    /// Appends a reset evaluated from the participating edges' updates.
    pub fn push_reset(&mut self, r: crate::dbm::Reset) {
        self.reset.push(r);
    }

    /// Appends a constraint evaluated from the target locations' invariants.
    pub fn push_tgt_invariant(&mut self, c: Constraint) {
        self.tgt_invariant.push(c);
    }

    /// Constraints from the source invariant.
    pub fn src_invariant(&self) -> &[Constraint] {
        &self.src_invariant
    }

    /// Constraints from the participating guards.
    pub fn guard(&self) -> &[Constraint] {
        &self.guard
    }

    /// The combined reset container.
    pub fn reset(&self) -> &ResetContainer {
        &self.reset
    }

    /// Constraints from the target invariant.
    pub fn tgt_invariant(&self) -> &[Constraint] {
        &self.tgt_invariant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbm::Bound;

    #[test]
    fn transition_accumulates_in_evaluation_order() {
        let mut t = Transition::new();
        t.set_vedge(Vedge::new([(0, 1)]), Some(3));
        t.push_src_invariant(Constraint {
            i: 1,
            j: 0,
            bound: Bound::le(10),
        });
        t.push_guard(Constraint {
            i: 1,
            j: 0,
            bound: Bound::le(5),
        });
        t.push_tgt_invariant(Constraint {
            i: 2,
            j: 0,
            bound: Bound::le(8),
        });

        assert_eq!(t.sync(), Some(3));
        assert_eq!(t.src_invariant().len(), 1);
        assert_eq!(t.guard().len(), 1);
        assert_eq!(t.tgt_invariant().len(), 1);
        assert!(t.vedge().unwrap().iter().eq([(0, 1)]));
    }
}
