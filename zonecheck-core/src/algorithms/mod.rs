//! Exploration algorithms (§4.6): reachability, covering reachability,
//! nested DFS, and Couvreur's SCC-based accepting-cycle check. All four
//! share the `successors` helper below; they differ in subsumption policy,
//! coloring discipline, and termination criterion.

mod couvreur;
mod cover;
mod ndfs;
mod reach;

pub use couvreur::{couvreur_scc, Stats as CouvreurStats};
pub use cover::{cover_reach, Stats as CoverStats, Subsumption};
pub use ndfs::{nested_dfs, Stats as NdfsStats};
pub use reach::{reach, Stats as ReachStats};

use crate::error::StateStatus;
use crate::pool::PoolRef;
use crate::state::State;
use crate::ts::TransitionSystem;
use crate::vm::Vm;

/// Computes every `Ok` successor of `state`, discarding transitions that
/// violate a guard or invariant (§4.6.5: "they do not fail on individual
/// transitions... a status != OK simply prunes that successor").
pub(crate) fn successors<B, V: Vm<B>>(ts: &mut TransitionSystem<B, V>, state: &State) -> Vec<PoolRef<State>> {
    let candidates = ts.outgoing_edges(state);
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let (status, successor, _) = ts.next(state, candidate);
        if let (StateStatus::Ok, Some(s)) = (status, successor) {
            out.push(s);
        }
    }
    out
}
