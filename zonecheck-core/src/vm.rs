//! The virtual-machine contract (§6 "Virtual machine"): a single opaque
//! entry point that interprets a location's invariant or an edge's
//! guard/update against the current integer-variable valuation, producing
//! the clock constraints or resets it implies.
//!
//! This module defines only the contract. A concrete interpreter for a
//! bytecode representation `B` is supplied by the driver (the narrow
//! expression interpreter in `zonecheck-cli` is one such implementation);
//! the core never constructs or inspects bytecode itself.

use crate::dbm::{Constraint, ResetContainer};
use crate::state::Intval;

/// Interprets bytecode of type `B` against an integer-variable valuation.
///
/// Returns `true` on success, with `clock_constraints`/`clock_resets`
/// appended to (never cleared — callers accumulate across several bytecode
/// runs within one `next()` call, per §4.5 steps 2-6). Returns `false` if an
/// integer-side predicate failed; the caller maps that to the appropriate
/// `StateStatus` variant and discards whatever was appended.
pub trait Vm<B> {
    /// Runs `bytecode`, mutating `intval` in place for update bytecode (a
    /// no-op mutation for invariant/guard bytecode) and appending any clock
    /// side effects it implies.
    fn run(
        &self,
        bytecode: &B,
        intval: &mut Intval,
        clock_constraints: &mut Vec<Constraint>,
        clock_resets: &mut ResetContainer,
    ) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbm::{Bound, Reset};

    /// A trivial VM used only to exercise the trait's calling convention in
    /// this crate's own test suite; `zonecheck-cli` supplies the real one.
    struct AlwaysResetFirstClock;

    impl Vm<()> for AlwaysResetFirstClock {
        fn run(
            &self,
            _bytecode: &(),
            _intval: &mut Intval,
            clock_constraints: &mut Vec<Constraint>,
            clock_resets: &mut ResetContainer,
        ) -> bool {
            clock_constraints.push(Constraint {
                i: 1,
                j: 0,
                bound: Bound::le(10),
            });
            clock_resets.push(Reset {
                target: 1,
                source: 0,
                shift: 0,
            });
            true
        }
    }

    #[test]
    fn trait_object_accumulates_side_effects() {
        let vm = AlwaysResetFirstClock;
        let mut intval = Intval::new([]);
        let mut constraints = Vec::new();
        let mut resets = ResetContainer::new();
        assert!(vm.run(&(), &mut intval, &mut constraints, &mut resets));
        assert_eq!(constraints.len(), 1);
        assert_eq!(resets.iter().count(), 1);
    }
}
