//! Covering reachability (§4.6.2): reachability with subsumption between
//! stored nodes sharing a vloc and intval.

use super::successors;
use crate::error::StateStatus;
use crate::labels::LabelSet;
use crate::logging::{log_algorithm_event, AlgorithmEvent};
use crate::pool::PoolRef;
use crate::state::State;
use crate::ts::TransitionSystem;
use crate::vm::Vm;
use crate::waiting::{Handle, SearchOrder, Worklist};
use crate::zone::ClockBounds;

/// Which inclusion relation [`cover_reach`] uses to subsume stored nodes.
///
/// `*Local` and `*Global` are distinguished only by how the caller derives
/// the [`ClockBounds`] passed in: global uses one bound map for the whole
/// system, local lets it vary per location and folds that choice into the
/// `ClockBounds` given to each call. The algorithm itself applies whatever
/// it is given identically in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsumption {
    /// Plain zone inclusion (`Zone::le`), the always-sound baseline.
    Inclusion,
    /// `aLU`-abstraction inclusion, with system-wide bounds.
    AluGlobal,
    /// `aLU`-abstraction inclusion, with per-location bounds.
    AluLocal,
    /// `aM`-abstraction inclusion, with system-wide bounds.
    AmGlobal,
    /// `aM`-abstraction inclusion, with per-location bounds.
    AmLocal,
}

/// Outcome of a [`cover_reach`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of states popped from the worklist.
    pub visited: usize,
    /// Number of distinct (vloc, intval, zone) nodes ever stored.
    pub stored: usize,
    /// Number of successors discarded because a stored active node already
    /// subsumed them, plus stored nodes retired because a fresher node
    /// subsumed them.
    pub covered: usize,
    /// Whether some visited state's labels intersect the target set.
    pub reachable: bool,
}

fn subsumes(big: &State, small: &State, policy: Subsumption, bounds: &ClockBounds) -> bool {
    if big.vloc() != small.vloc() || big.intval() != small.intval() {
        return false;
    }
    match policy {
        Subsumption::Inclusion => small.zone().le(big.zone()),
        Subsumption::AluGlobal | Subsumption::AluLocal => small.zone().is_alu_le(big.zone(), &bounds.lower, &bounds.upper),
        Subsumption::AmGlobal | Subsumption::AmLocal => small.zone().is_am_le(big.zone(), &bounds.upper),
    }
}

/// Explores the reachable state space in `order`, discarding any freshly
/// computed successor subsumed by an already-stored active node, and
/// retiring stored nodes subsumed by a fresher one (§4.6.2).
///
/// Soundness requires extrapolation to already have been applied by every
/// `next()` call when `policy` is not [`Subsumption::Inclusion`] (the
/// `TransitionSystem` passed in is expected to carry the matching
/// extrapolation policy).
pub fn cover_reach<B, V: Vm<B>>(
    ts: &mut TransitionSystem<B, V>,
    accepting: &LabelSet,
    policy: Subsumption,
    bounds: &ClockBounds,
    order: SearchOrder,
) -> Stats {
    let mut worklist: Worklist<PoolRef<State>> = Worklist::new(order);
    let mut stored: Vec<(PoolRef<State>, Handle<PoolRef<State>>)> = Vec::new();
    let mut visited = 0;
    let mut covered = 0;
    let mut reachable = false;

    let mut try_store = |state: PoolRef<State>, stored: &mut Vec<(PoolRef<State>, Handle<PoolRef<State>>)>, worklist: &mut Worklist<PoolRef<State>>, covered: &mut usize| {
        for (existing, handle) in stored.iter() {
            if handle.is_active() && subsumes(existing, &state, policy, bounds) {
                *covered += 1;
                return;
            }
        }
        for (existing, handle) in stored.iter() {
            if handle.is_active() && subsumes(&state, existing, policy, bounds) {
                handle.deactivate();
                *covered += 1;
            }
        }
        let handle = worklist.push(state.clone());
        stored.push((state, handle));
    };

    for edge in ts.initial_edges() {
        let (status, state) = ts.initial(&edge);
        if let (StateStatus::Ok, Some(s)) = (status, state) {
            try_store(s, &mut stored, &mut worklist, &mut covered);
        }
    }
    log_algorithm_event(AlgorithmEvent::Started {
        algorithm: "cover_reach",
        initial_count: stored.len(),
    });

    while let Some(handle) = worklist.pop() {
        let state = handle.get().clone();
        visited += 1;
        log_algorithm_event(AlgorithmEvent::Visiting {
            algorithm: "cover_reach",
            visited_so_far: visited,
        });
        if state.labels().intersects(accepting) {
            reachable = true;
            break;
        }
        for successor in successors(ts, &state) {
            try_store(successor, &mut stored, &mut worklist, &mut covered);
        }
    }

    log_algorithm_event(AlgorithmEvent::Finished {
        algorithm: "cover_reach",
        visited,
        found: reachable,
    });
    Stats {
        visited,
        stored: stored.len(),
        covered,
        reachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbm::Reset;
    use crate::model::{ClockDecl, EdgeDef, LocationDef, SyncVector, System};
    use crate::ts::Semantics;
    use crate::zone::ExtrapolationPolicy;
    use smallvec::SmallVec;

    enum Bytecode {
        Nop,
        ResetX,
    }

    struct SelfLoopVm;
    impl Vm<Bytecode> for SelfLoopVm {
        fn run(
            &self,
            bytecode: &Bytecode,
            _intval: &mut crate::state::Intval,
            _clock_constraints: &mut Vec<crate::dbm::Constraint>,
            clock_resets: &mut crate::dbm::ResetContainer,
        ) -> bool {
            if let Bytecode::ResetX = bytecode {
                clock_resets.push(Reset {
                    target: 1,
                    source: 0,
                    shift: 0,
                });
            }
            true
        }
    }

    /// Scenario 4 (§8): self-loop resetting `x`, `U(x) = L(x) = 2`. Without
    /// subsumption the zone graph grows forever; `aLU-local` collapses it to
    /// a single stored, active node.
    #[test]
    fn alu_subsumption_collapses_self_loop_to_a_fixed_point() {
        let system: System<Bytecode> = System::new(
            vec!["P".to_string()],
            vec![LocationDef {
                process: 0,
                name: "l".to_string(),
                initial: true,
                committed: false,
                urgent: false,
                invariant: Bytecode::Nop,
                labels: SmallVec::new(),
            }],
            vec![EdgeDef {
                process: 0,
                src: 0,
                tgt: 0,
                event: 0,
                guard: Bytecode::Nop,
                update: Bytecode::ResetX,
            }],
            Vec::<SyncVector>::new(),
            vec![ClockDecl {
                name: "x".to_string(),
                count: 1,
            }],
            vec![],
            vec![],
        );
        let vm = SelfLoopVm;
        let bounds = ClockBounds::from_lu(vec![0, 0], vec![0, 2]);
        let mut ts = crate::ts::TransitionSystem::new(
            &system,
            &vm,
            Semantics::Elapsed,
            ExtrapolationPolicy::ExtraLu,
            bounds.clone(),
            16,
            16,
        );
        let empty_labels = LabelSet::empty(0);
        let stats = cover_reach(&mut ts, &empty_labels, Subsumption::AluLocal, &bounds, SearchOrder::Bfs);
        assert_eq!(stats.visited, 1);
        assert_eq!(stats.covered, 1);
    }
}
