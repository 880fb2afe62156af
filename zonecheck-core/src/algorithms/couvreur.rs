//! Couvreur's SCC-based accepting-cycle check (§4.6.4): a stack of nodes
//! plus a parallel stack of SCC roots, each carrying whether the candidate
//! SCC it represents has seen an accepting state. A back edge into an
//! already-live node collapses every root down to that node's position,
//! merging their accepting flags; an accepting flag surviving a collapse
//! that reaches back to (or above) the edge's own position is a witness
//! cycle.

use super::successors;
use crate::error::StateStatus;
use crate::labels::LabelSet;
use crate::logging::{log_algorithm_event, AlgorithmEvent};
use crate::pool::PoolRef;
use crate::state::State;
use crate::ts::TransitionSystem;
use crate::vm::Vm;
use fnv::FnvHashMap;

/// Outcome of a [`couvreur_scc`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of distinct states ever pushed onto the DFS stack.
    pub visited: usize,
    /// Total states ever interned by the transition system (§8: must equal
    /// `visited` only when every node is part of a singleton SCC; in general
    /// stored includes states interned but skipped).
    pub stored: usize,
    /// Whether an accepting cycle was found.
    pub cycle: bool,
}

struct Search {
    stack: Vec<PoolRef<State>>,
    position: FnvHashMap<PoolRef<State>, usize>,
    root: Vec<usize>,
    root_accepting: Vec<bool>,
    visited: usize,
    cycle: bool,
}

impl Search {
    fn dfs<B, V: Vm<B>>(&mut self, ts: &mut TransitionSystem<B, V>, s: PoolRef<State>, accepting: &LabelSet) {
        let pos = self.stack.len();
        self.position.insert(s.clone(), pos);
        self.visited += 1;
        let s_accept = s.labels().intersects(accepting);
        log_algorithm_event(AlgorithmEvent::Visiting {
            algorithm: "couvreur_scc",
            visited_so_far: self.visited,
        });
        self.stack.push(s.clone());
        self.root.push(pos);
        self.root_accepting.push(s_accept);

        for t in successors(ts, &s) {
            if self.cycle {
                return;
            }
            if !self.position.contains_key(&t) {
                self.dfs(ts, t.clone(), accepting);
                if self.cycle {
                    return;
                }
            }
            if let Some(&tpos) = self.position.get(&t) {
                let mut merged_accept = false;
                while *self.root.last().expect("root stack never empties mid-search") > tpos {
                    self.root.pop();
                    merged_accept |= self.root_accepting.pop().unwrap();
                }
                let top_accept = self.root_accepting.last_mut().unwrap();
                *top_accept = *top_accept || merged_accept;
                if *top_accept && tpos <= pos {
                    self.cycle = true;
                    return;
                }
            }
        }

        if *self.root.last().expect("root stack never empties mid-search") == pos {
            self.root.pop();
            self.root_accepting.pop();
            while self.stack.len() > pos {
                let top = self.stack.pop().unwrap();
                self.position.remove(&top);
            }
        }
    }
}

/// Runs Couvreur's algorithm from every initial state until an accepting
/// cycle is found or the reachable state space is exhausted.
pub fn couvreur_scc<B, V: Vm<B>>(ts: &mut TransitionSystem<B, V>, accepting: &LabelSet) -> Stats {
    let mut search = Search {
        stack: Vec::new(),
        position: FnvHashMap::default(),
        root: Vec::new(),
        root_accepting: Vec::new(),
        visited: 0,
        cycle: false,
    };

    let initial_edges = ts.initial_edges();
    log_algorithm_event(AlgorithmEvent::Started {
        algorithm: "couvreur_scc",
        initial_count: initial_edges.len(),
    });

    for edge in initial_edges {
        if search.cycle {
            break;
        }
        let (status, state) = ts.initial(&edge);
        if let (StateStatus::Ok, Some(s0)) = (status, state) {
            if !search.position.contains_key(&s0) {
                search.dfs(ts, s0, accepting);
            }
        }
    }

    log_algorithm_event(AlgorithmEvent::Finished {
        algorithm: "couvreur_scc",
        visited: search.visited,
        found: search.cycle,
    });
    Stats {
        visited: search.visited,
        stored: ts.interned_count(),
        cycle: search.cycle,
    }
}
