//! The transition system (§4.5): turns a [`crate::model::System`] plus a
//! [`crate::vm::Vm`] into `initial`/`outgoing_edges`/`next`/`prev`, owning the
//! pools and hash-cons tables every interned [`State`] and its sub-objects
//! are drawn from.

mod semantics;

pub use semantics::Semantics;

use crate::dbm::{Constraint, DbmStatus, ResetContainer};
use crate::error::StateStatus;
use crate::labels::LabelSet;
use crate::logging::{log_intern_event, InternEvent};
use crate::model::{EdgeDef, Strength, System};
use crate::pool::{HashCons, Pool, PoolRef};
use crate::state::{Intval, State, SyncId, Transition, Vedge, Vloc};
use crate::vm::Vm;
use crate::zone::{ClockBounds, ExtrapolationPolicy, Zone};

/// A candidate combination of participating edges, not yet checked against
/// any guard or invariant (§4.5 "outgoing_edges... yields vedges").
#[derive(Debug, Clone)]
pub struct VedgeCandidate {
    vedge: Vedge,
    sync: SyncId,
}

impl VedgeCandidate {
    /// The combined vedge.
    pub fn vedge(&self) -> &Vedge {
        &self.vedge
    }

    /// The synchronisation id, if any.
    pub fn sync(&self) -> SyncId {
        self.sync
    }
}

/// Owns the pools, hash-cons tables, and configuration an exploration run
/// threads through every `initial`/`next`/`prev` call.
pub struct TransitionSystem<'m, B, V> {
    model: &'m System<B>,
    vm: &'m V,
    semantics: Semantics,
    extrapolation: ExtrapolationPolicy,
    bounds: ClockBounds,
    dim: usize,
    vloc_pool: Pool<Vloc>,
    vloc_cons: HashCons<Vloc>,
    intval_pool: Pool<Intval>,
    intval_cons: HashCons<Intval>,
    zone_pool: Pool<Zone>,
    zone_cons: HashCons<Zone>,
    state_pool: Pool<State>,
    state_cons: HashCons<State>,
}

impl<'m, B, V: Vm<B>> TransitionSystem<'m, B, V> {
    /// Builds a transition system over `model`, backed by `vm` for bytecode
    /// interpretation, with pools sized to `block_size` cells per block and
    /// hash-cons tables pre-sized to `table_size` entries.
    pub fn new(
        model: &'m System<B>,
        vm: &'m V,
        semantics: Semantics,
        extrapolation: ExtrapolationPolicy,
        bounds: ClockBounds,
        block_size: usize,
        table_size: usize,
    ) -> Self {
        TransitionSystem {
            model,
            vm,
            semantics,
            extrapolation,
            bounds,
            dim: model.num_clocks() + 1,
            vloc_pool: Pool::new(block_size),
            vloc_cons: HashCons::with_capacity(table_size),
            intval_pool: Pool::new(block_size),
            intval_cons: HashCons::with_capacity(table_size),
            zone_pool: Pool::new(block_size),
            zone_cons: HashCons::with_capacity(table_size),
            state_pool: Pool::new(block_size),
            state_cons: HashCons::with_capacity(table_size),
        }
    }

    /// Number of distinct states interned so far; the figure the `couvreur`
    /// algorithm's "stored states" statistic must equal (§8).
    pub fn interned_count(&self) -> usize {
        self.state_cons.len()
    }

    fn intern_vloc(&mut self, vloc: Vloc) -> PoolRef<Vloc> {
        let before = self.vloc_cons.len();
        let interned = self.vloc_cons.find_or_insert(self.vloc_pool.construct(vloc));
        log_intern(before, self.vloc_cons.len(), "vloc");
        interned
    }

    fn intern_intval(&mut self, intval: Intval) -> PoolRef<Intval> {
        let before = self.intval_cons.len();
        let interned = self.intval_cons.find_or_insert(self.intval_pool.construct(intval));
        log_intern(before, self.intval_cons.len(), "intval");
        interned
    }

    fn intern_zone(&mut self, zone: Zone) -> PoolRef<Zone> {
        let before = self.zone_cons.len();
        let interned = self.zone_cons.find_or_insert(self.zone_pool.construct(zone));
        log_intern(before, self.zone_cons.len(), "zone");
        interned
    }

    fn build_and_intern_state(&mut self, vloc: Vloc, intval: Intval, zone: Zone, labels: LabelSet) -> PoolRef<State> {
        let vloc = self.intern_vloc(vloc);
        let intval = self.intern_intval(intval);
        let zone = self.intern_zone(zone);
        let state = State::new(vloc, intval, zone, labels);
        let before = self.state_cons.len();
        let interned = self.state_cons.find_or_insert(self.state_pool.construct(state));
        log_intern(before, self.state_cons.len(), "state");
        interned
    }

    /// Events that appear in at least one synchronisation vector; an edge
    /// whose event is not in this set fires asynchronously (§4.5 (i)).
    fn sync_events(&self) -> std::collections::HashSet<u32> {
        self.model
            .syncs()
            .iter()
            .flat_map(|s| s.constraints().iter().map(|c| c.event))
            .collect()
    }

    /// Candidate vlocs for `initial_edges`: the cartesian product of each
    /// process's initial locations (most models declare exactly one).
    pub fn initial_edges(&self) -> Vec<Vloc> {
        let mut per_process: Vec<Vec<u32>> = Vec::with_capacity(self.model.num_processes());
        for pid in 0..self.model.num_processes() as u32 {
            let initials: Vec<u32> = self
                .model
                .locations_of(pid)
                .filter(|(_, l)| l.initial)
                .map(|(id, _)| id)
                .collect();
            per_process.push(initials);
        }
        cartesian(&per_process).into_iter().map(Vloc::new).collect()
    }

    /// Evaluates every location's invariant in `vloc` against `intval`,
    /// appending clock constraints. Returns `false` on the first integer-side
    /// failure.
    fn check_invariants(&self, vloc: &Vloc, intval: &mut Intval, constraints: &mut Vec<Constraint>) -> bool {
        for (pid, loc) in vloc.iter() {
            let def = self.model.location(pid as u32, loc);
            if !self
                .vm
                .run(&def.invariant, intval, constraints, &mut ResetContainer::new())
            {
                return false;
            }
        }
        true
    }

    /// The accepting-label bitset derived from every location in `vloc`.
    fn labels_of(&self, vloc: &Vloc) -> LabelSet {
        let mut labels = LabelSet::empty(self.model.label_names().len());
        for (pid, loc) in vloc.iter() {
            let def = self.model.location(pid as u32, loc);
            for &l in &def.labels {
                labels.insert(l as usize);
            }
        }
        labels
    }

    /// True if time may not elapse while any process in `vloc` is committed
    /// or urgent (§4.5 "Delay admissibility").
    fn delay_forbidden(&self, vloc: &Vloc) -> bool {
        vloc.iter().any(|(pid, loc)| {
            let def = self.model.location(pid as u32, loc);
            def.committed || def.urgent
        })
    }

    /// `initial(edge)` (§4.5): builds the initial state for one cartesian
    /// choice of per-process initial locations.
    pub fn initial(&mut self, edge: &Vloc) -> (StateStatus, Option<PoolRef<State>>) {
        let mut intval = Intval::new(self.model.initial_intvar_values());
        let mut constraints = Vec::new();
        if !self.check_invariants(edge, &mut intval, &mut constraints) {
            return (StateStatus::IntvarsSrcInvariantViolated, None);
        }

        let mut zone = Zone::zero(self.dim);
        if zone.constrain_all(&constraints) == DbmStatus::Empty {
            return (StateStatus::ClocksSrcInvariantViolated, None);
        }
        if self.semantics == Semantics::Elapsed && !self.delay_forbidden(edge) {
            zone.open_up();
            if zone.constrain_all(&constraints) == DbmStatus::Empty {
                return (StateStatus::ClocksSrcInvariantViolated, None);
            }
        }
        zone.extrapolate(self.extrapolation, &self.bounds);

        let labels = self.labels_of(edge);
        let state = self.build_and_intern_state(edge.clone(), intval, zone, labels);
        (StateStatus::Ok, Some(state))
    }

    /// `outgoing_edges(vloc)` (§4.5 (i)-(ii)): every asynchronous edge plus
    /// every synchronisation enabled at `vloc`.
    pub fn outgoing_edges(&self, state: &State) -> Vec<VedgeCandidate> {
        let vloc = state.vloc();
        let sync_events = self.sync_events();
        let mut out = Vec::new();

        for (pid, loc) in vloc.iter() {
            for edge in self.model.edges_from(pid as u32, loc) {
                if !sync_events.contains(&edge.event) {
                    out.push(VedgeCandidate {
                        vedge: Vedge::new([(pid as u32, edge_id(self.model, edge))]),
                        sync: None,
                    });
                }
            }
        }

        for (sync_id, sync) in self.model.syncs().iter().enumerate() {
            let mut choices: Vec<Vec<(u32, u32)>> = Vec::new();
            let mut feasible = true;
            for c in sync.constraints() {
                let loc = vloc.get(c.process as usize);
                let matches: Vec<(u32, u32)> = self
                    .model
                    .edges_from(c.process, loc)
                    .filter(|e| e.event == c.event)
                    .map(|e| (c.process, edge_id(self.model, e)))
                    .collect();
                match c.strength {
                    Strength::Strong => {
                        if matches.is_empty() {
                            feasible = false;
                            break;
                        }
                        choices.push(matches);
                    }
                    Strength::Weak => {
                        if !matches.is_empty() {
                            choices.push(matches);
                        }
                    }
                }
            }
            if !feasible {
                continue;
            }
            for combo in cartesian(&choices) {
                out.push(VedgeCandidate {
                    vedge: Vedge::new(combo),
                    sync: Some(sync_id as u32),
                });
            }
        }

        out
    }

    /// `next(state, vedge)` (§4.5): the nine-step evaluation producing a
    /// status, the successor state (if any), and the transition that
    /// produced it.
    pub fn next(&mut self, state: &State, candidate: &VedgeCandidate) -> (StateStatus, Option<PoolRef<State>>, Transition) {
        let mut transition = Transition::new();
        transition.set_vedge(candidate.vedge.clone(), candidate.sync);

        let mut vloc = state.vloc().clone();
        let mut intval = state.intval().clone();
        let mut zone = state.zone().clone();

        let standard = self.semantics == Semantics::Standard;
        if standard && !self.delay_forbidden(&vloc) {
            zone.open_up();
        }

        let mut src_constraints = Vec::new();
        if !self.check_invariants(&vloc, &mut intval, &mut src_constraints) {
            return (StateStatus::IntvarsSrcInvariantViolated, None, transition);
        }
        for c in &src_constraints {
            transition.push_src_invariant(*c);
        }
        if zone.constrain_all(&src_constraints) == DbmStatus::Empty {
            return (StateStatus::ClocksSrcInvariantViolated, None, transition);
        }

        let participants: Vec<(u32, u32)> = candidate.vedge.iter().collect();
        for &(pid, eid) in &participants {
            let edge = &self.model.edges()[eid as usize];
            vloc = vloc.with(pid as usize, edge.tgt);
        }

        let mut guard_constraints = Vec::new();
        for &(_, eid) in &participants {
            let edge = &self.model.edges()[eid as usize];
            if !self
                .vm
                .run(&edge.guard, &mut intval, &mut guard_constraints, &mut ResetContainer::new())
            {
                return (StateStatus::IntvarsGuardViolated, None, transition);
            }
        }
        for c in &guard_constraints {
            transition.push_guard(*c);
        }
        if zone.constrain_all(&guard_constraints) == DbmStatus::Empty {
            return (StateStatus::ClocksGuardViolated, None, transition);
        }

        let mut resets = ResetContainer::new();
        for &(_, eid) in &participants {
            let edge = &self.model.edges()[eid as usize];
            if !self.vm.run(&edge.update, &mut intval, &mut Vec::new(), &mut resets) {
                return (StateStatus::IntvarsStatementFailed, None, transition);
            }
        }
        for r in resets.iter() {
            transition.push_reset(*r);
        }
        if zone.apply_reset(&resets) == DbmStatus::Empty {
            return (StateStatus::ClocksResetFailed, None, transition);
        }

        let mut tgt_constraints = Vec::new();
        if !self.check_invariants(&vloc, &mut intval, &mut tgt_constraints) {
            return (StateStatus::IntvarsTgtInvariantViolated, None, transition);
        }
        for c in &tgt_constraints {
            transition.push_tgt_invariant(*c);
        }
        if zone.constrain_all(&tgt_constraints) == DbmStatus::Empty {
            return (StateStatus::ClocksTgtInvariantViolated, None, transition);
        }

        if !standard && !self.delay_forbidden(&vloc) {
            zone.open_up();
            if zone.constrain_all(&tgt_constraints) == DbmStatus::Empty {
                return (StateStatus::ClocksTgtInvariantViolated, None, transition);
            }
        }
        zone.extrapolate(self.extrapolation, &self.bounds);

        let labels = self.labels_of(&vloc);
        let successor = self.build_and_intern_state(vloc, intval, zone, labels);
        (StateStatus::Ok, Some(successor), transition)
    }

    /// `prev` (§4.5, §9 open question (ii)): runs `next` forward from a
    /// caller-supplied candidate predecessor and checks the result matches
    /// `target` exactly. The zone is re-derived from the candidate rather
    /// than cloned from `target`, per the open question noted in the design
    /// notes: cloning would be cheaper but this keeps `prev` honest about
    /// only trusting what `next` itself would produce.
    pub fn prev(
        &mut self,
        target: &State,
        candidate_vloc: Vloc,
        candidate_intval: Intval,
        candidate_zone: Zone,
        edge: &VedgeCandidate,
    ) -> (StateStatus, Option<PoolRef<State>>) {
        let candidate = self.build_and_intern_state(
            candidate_vloc,
            candidate_intval,
            candidate_zone,
            LabelSet::empty(self.model.label_names().len()),
        );
        let (status, successor, _) = self.next(&candidate, edge);
        match (status, successor) {
            (StateStatus::Ok, Some(s))
                if s.vloc() == target.vloc() && s.intval() == target.intval() && s.zone().equals(target.zone()) =>
            {
                (StateStatus::Ok, Some(candidate))
            }
            (StateStatus::Ok, Some(_)) => (StateStatus::IncompatibleEdge, None),
            (other, _) => (other, None),
        }
    }
}

fn log_intern(before: usize, after: usize, table: &'static str) {
    if after > before {
        log_intern_event(InternEvent::Inserted { table, total: after });
    } else {
        log_intern_event(InternEvent::Reused { table });
    }
}

fn edge_id<B>(model: &System<B>, edge: &EdgeDef<B>) -> u32 {
    model
        .edges()
        .iter()
        .position(|e| std::ptr::eq(e, edge))
        .expect("edge must belong to the model it was looked up from") as u32
}

/// Plain cartesian product over a slice of choice lists; an empty input
/// yields a single empty combination (the identity for "no participants").
fn cartesian<T: Clone>(choices: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut out = vec![Vec::new()];
    for choice in choices {
        let mut next = Vec::with_capacity(out.len() * choice.len().max(1));
        for partial in &out {
            for item in choice {
                let mut combo = partial.clone();
                combo.push(item.clone());
                next.push(combo);
            }
        }
        out = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartesian_of_empty_input_has_one_empty_combination() {
        let choices: Vec<Vec<u32>> = vec![];
        assert_eq!(cartesian(&choices), vec![Vec::<u32>::new()]);
    }

    #[test]
    fn cartesian_multiplies_sizes() {
        let choices = vec![vec![1, 2], vec![10, 20]];
        let product = cartesian(&choices);
        assert_eq!(product.len(), 4);
        assert!(product.contains(&vec![1, 10]));
        assert!(product.contains(&vec![2, 20]));
    }
}
