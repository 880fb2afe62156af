//! Nested DFS, Gaiser-Schwoon variant (§4.6.3): detects an accepting lasso
//! via a 4-colored outer (blue) DFS and an inner (red) DFS triggered from
//! accepting nodes whose successors are not all already red.

use super::successors;
use crate::error::StateStatus;
use crate::labels::LabelSet;
use crate::logging::{log_algorithm_event, AlgorithmEvent};
use crate::pool::PoolRef;
use crate::state::State;
use crate::ts::TransitionSystem;
use crate::vm::Vm;
use fnv::FnvHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Cyan,
    Blue,
    Red,
}

/// Outcome of a [`nested_dfs`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of distinct states ever colored (first-seen count).
    pub visited: usize,
    /// Whether an accepting lasso was found.
    pub cycle: bool,
}

struct Frame {
    state: PoolRef<State>,
    succs: Vec<PoolRef<State>>,
    idx: usize,
    allred: bool,
}

/// Runs the outer/inner DFS pair until an accepting lasso is found or the
/// reachable state space is exhausted.
pub fn nested_dfs<B, V: Vm<B>>(ts: &mut TransitionSystem<B, V>, accepting: &LabelSet) -> Stats {
    let mut colors: FnvHashMap<PoolRef<State>, Color> = FnvHashMap::default();
    let mut visited = 0;
    let mut cycle = false;

    log_algorithm_event(AlgorithmEvent::Started {
        algorithm: "nested_dfs",
        initial_count: ts.initial_edges().len(),
    });

    'initials: for edge in ts.initial_edges() {
        let (status, state) = ts.initial(&edge);
        let Some(s0) = (match status {
            StateStatus::Ok => state,
            _ => None,
        }) else {
            continue;
        };
        if colors.contains_key(&s0) {
            continue;
        }

        visited += 1;
        colors.insert(s0.clone(), Color::Cyan);
        let succs = successors(ts, &s0);
        let mut stack = vec![Frame {
            state: s0,
            succs,
            idx: 0,
            allred: true,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.idx < frame.succs.len() {
                let t = frame.succs[frame.idx].clone();
                frame.idx += 1;
                let s_accept = frame.state.labels().intersects(accepting);

                match colors.get(&t).copied() {
                    Some(Color::Cyan) => {
                        if s_accept || t.labels().intersects(accepting) {
                            cycle = true;
                            break 'initials;
                        }
                        frame.allred = false;
                    }
                    None => {
                        visited += 1;
                        log_algorithm_event(AlgorithmEvent::Visiting {
                            algorithm: "nested_dfs",
                            visited_so_far: visited,
                        });
                        colors.insert(t.clone(), Color::Cyan);
                        let succs_t = successors(ts, &t);
                        stack.push(Frame {
                            state: t,
                            succs: succs_t,
                            idx: 0,
                            allred: true,
                        });
                    }
                    Some(Color::Red) => {}
                    Some(Color::Blue) => {
                        frame.allred = false;
                    }
                }
            } else {
                let finished = stack.pop().expect("loop condition guarantees a frame");
                if finished.allred {
                    colors.insert(finished.state.clone(), Color::Red);
                } else if finished.state.labels().intersects(accepting) {
                    if red_dfs(ts, &finished.state, accepting, &mut colors) {
                        cycle = true;
                        break 'initials;
                    }
                    colors.insert(finished.state.clone(), Color::Red);
                } else {
                    colors.insert(finished.state.clone(), Color::Blue);
                    if let Some(pred) = stack.last_mut() {
                        pred.allred = false;
                    }
                }
            }
        }
    }

    log_algorithm_event(AlgorithmEvent::Finished {
        algorithm: "nested_dfs",
        visited,
        found: cycle,
    });
    Stats { visited, cycle }
}

/// The inner (red) DFS: explores forward from `start`, coloring non-red
/// nodes red; reports a cycle if it reaches a cyan node (an ancestor still
/// on the outer DFS's path).
fn red_dfs<B, V: Vm<B>>(
    ts: &mut TransitionSystem<B, V>,
    start: &PoolRef<State>,
    _accepting: &LabelSet,
    colors: &mut FnvHashMap<PoolRef<State>, Color>,
) -> bool {
    let mut stack = vec![start.clone()];
    while let Some(s) = stack.pop() {
        for t in successors(ts, &s) {
            match colors.get(&t).copied() {
                Some(Color::Cyan) => return true,
                Some(Color::Red) => {}
                _ => {
                    colors.insert(t.clone(), Color::Red);
                    stack.push(t);
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClockDecl, EdgeDef, LocationDef, System};
    use crate::ts::Semantics;
    use crate::zone::{ClockBounds, ExtrapolationPolicy};
    use smallvec::SmallVec;

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

    fn labelled_system(accepting_loc: &str, locs: Vec<(&str, bool, Option<(u32, u32)>)>) -> System<()> {
        let mut locations = Vec::new();
        let mut edges = Vec::new();
        for (idx, (name, initial, edge_to)) in locs.iter().enumerate() {
            let mut labels = SmallVec::new();
            if *name == accepting_loc {
                labels.push(0u32);
            }
            locations.push(LocationDef {
                process: 0,
                name: name.to_string(),
                initial: *initial,
                committed: false,
                urgent: false,
                invariant: (),
                labels,
            });
            if let Some((src, tgt)) = edge_to {
                edges.push(EdgeDef {
                    process: 0,
                    src: *src,
                    tgt: *tgt,
                    event: idx as u32,
                    guard: (),
                    update: (),
                });
            }
        }
        System::new(
            vec!["P".to_string()],
            locations,
            edges,
            vec![],
            vec![ClockDecl {
                name: "x".to_string(),
                count: 1,
            }],
            vec![],
            vec!["accepting".to_string()],
        )
    }

    #[test]
    fn self_loop_on_accepting_location_is_a_lasso() {
        let system = labelled_system("a", vec![("a", true, Some((0, 0)))]);
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
        let mut accepting = LabelSet::empty(1);
        accepting.insert(0);
        let stats = nested_dfs(&mut ts, &accepting);
        assert!(stats.cycle);
    }

    #[test]
    fn linear_chain_to_accepting_sink_has_no_lasso() {
        let system = labelled_system(
            "c",
            vec![("a", true, Some((0, 1))), ("b", false, Some((1, 2))), ("c", false, None)],
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
        let mut accepting = LabelSet::empty(1);
        accepting.insert(0);
        let stats = nested_dfs(&mut ts, &accepting);
        assert!(!stats.cycle);
        assert_eq!(stats.visited, 3);
    }

    /// `r{initial} -> n -> r` (a non-accepting back edge to the still-cyan
    /// root) and `r -> m{accepting} -> n` forms the lasso `m -> n -> r -> m`.
    /// `n` finishes before `m` is even visited: if the cyan back-edge from
    /// `n` to `r` failed to clear `n`'s `allred` flag, `n` would be colored
    /// red instead of blue, which would then leave `m`'s `allred` flag
    /// (wrongly) set and skip the inner DFS that finds the lasso.
    #[test]
    fn lasso_through_a_node_finished_before_the_accepting_node_is_visited() {
        let mut m = LocationDef {
            process: 0,
            name: "m".to_string(),
            initial: false,
            committed: false,
            urgent: false,
            invariant: (),
            labels: SmallVec::new(),
        };
        m.labels.push(0u32);
        let system: System<()> = System::new(
            vec!["P".to_string()],
            vec![
                LocationDef {
                    process: 0,
                    name: "r".to_string(),
                    initial: true,
                    committed: false,
                    urgent: false,
                    invariant: (),
                    labels: SmallVec::new(),
                },
                LocationDef {
                    process: 0,
                    name: "n".to_string(),
                    initial: false,
                    committed: false,
                    urgent: false,
                    invariant: (),
                    labels: SmallVec::new(),
                },
                m,
            ],
            vec![
                EdgeDef {
                    process: 0,
                    src: 0,
                    tgt: 1,
                    event: 0,
                    guard: (),
                    update: (),
                },
                EdgeDef {
                    process: 0,
                    src: 0,
                    tgt: 2,
                    event: 1,
                    guard: (),
                    update: (),
                },
                EdgeDef {
                    process: 0,
                    src: 1,
                    tgt: 0,
                    event: 2,
                    guard: (),
                    update: (),
                },
                EdgeDef {
                    process: 0,
                    src: 2,
                    tgt: 1,
                    event: 3,
                    guard: (),
                    update: (),
                },
            ],
            vec![],
            vec![ClockDecl {
                name: "x".to_string(),
                count: 1,
            }],
            vec![],
            vec!["accepting".to_string()],
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
        let mut accepting = LabelSet::empty(1);
        accepting.insert(0);
        let stats = nested_dfs(&mut ts, &accepting);
        assert!(stats.cycle);
    }
}
