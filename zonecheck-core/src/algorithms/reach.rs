//! Simple reachability (§4.6.1).

use super::successors;
use crate::error::StateStatus;
use crate::labels::LabelSet;
use crate::logging::{log_algorithm_event, AlgorithmEvent};
use crate::pool::PoolRef;
use crate::state::State;
use crate::ts::TransitionSystem;
use crate::vm::Vm;
use crate::waiting::{SearchOrder, Worklist};
use fnv::FnvHashSet;

/// Outcome of a [`reach`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of states popped from the worklist.
    pub visited: usize,
    /// Whether some visited state's labels intersect the target set.
    pub reachable: bool,
}

/// Explores the reachable state space in `order`, stopping as soon as a
/// state whose labels intersect `accepting` is visited.
pub fn reach<B, V: Vm<B>>(ts: &mut TransitionSystem<B, V>, accepting: &LabelSet, order: SearchOrder) -> Stats {
    let mut discovered: FnvHashSet<PoolRef<State>> = FnvHashSet::default();
    let mut worklist: Worklist<PoolRef<State>> = Worklist::new(order);
    let mut visited = 0;
    let mut reachable = false;

    for edge in ts.initial_edges() {
        let (status, state) = ts.initial(&edge);
        if let (StateStatus::Ok, Some(s)) = (status, state) {
            if discovered.insert(s.clone()) {
                worklist.push(s);
            }
        }
    }
    log_algorithm_event(AlgorithmEvent::Started {
        algorithm: "reach",
        initial_count: discovered.len(),
    });

    while let Some(handle) = worklist.pop() {
        let state = handle.get().clone();
        visited += 1;
        log_algorithm_event(AlgorithmEvent::Visiting {
            algorithm: "reach",
            visited_so_far: visited,
        });
        if state.labels().intersects(accepting) {
            reachable = true;
            break;
        }
        for successor in successors(ts, &state) {
            if discovered.insert(successor.clone()) {
                worklist.push(successor);
            }
        }
    }

    log_algorithm_event(AlgorithmEvent::Finished {
        algorithm: "reach",
        visited,
        found: reachable,
    });
    Stats { visited, reachable }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClockDecl, LocationDef, System};
    use crate::ts::Semantics;
    use crate::vm::Vm;
    use crate::zone::{ClockBounds, ExtrapolationPolicy};
    use smallvec::SmallVec;

    /// Bytecode for the "point initial" scenario (§8 scenario 1): no
    /// guard/invariant/update ever does anything.
    struct NoOpVm;
    impl Vm<()> for NoOpVm {
        fn run(
            &self,
            _bytecode: &(),
            _intval: &mut crate::state::Intval,
            _clock_constraints: &mut Vec<crate::dbm::Constraint>,
            _clock_resets: &mut crate::dbm::ResetContainer,
        ) -> bool {
            true
        }
    }

    #[test]
    fn point_initial_has_one_unreachable_state() {
        let system: System<()> = System::new(
            vec!["P".to_string()],
            vec![LocationDef {
                process: 0,
                name: "l0".to_string(),
                initial: true,
                committed: false,
                urgent: false,
                invariant: (),
                labels: SmallVec::new(),
            }],
            vec![],
            vec![],
            vec![ClockDecl {
                name: "x".to_string(),
                count: 1,
            }],
            vec![],
            vec!["goal".to_string()],
        );
        let vm = NoOpVm;
        let mut ts = crate::ts::TransitionSystem::new(
            &system,
            &vm,
            Semantics::Standard,
            ExtrapolationPolicy::None,
            ClockBounds::unbounded(2),
            16,
            16,
        );
        let stats = reach(&mut ts, &LabelSet::empty(1), SearchOrder::Bfs);
        assert_eq!(stats.visited, 1);
        assert!(!stats.reachable);
    }
}
