//! Model inputs (§6 "Model loader"): the elaborated system a transition
//! system walks. The bytecode carried by invariants, guards, and updates is
//! opaque here — the VM contract is the single point where it is interpreted
//! (see [`crate::vm`]).

use crate::state::LocId;
use smallvec::SmallVec;

/// Strength of a process's participation in a synchronisation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strength {
    /// The synchronisation is only enabled when this process can also fire
    /// the paired event asynchronously.
    Strong,
    /// The synchronisation may fire even if no asynchronous edge on this
    /// process is otherwise enabled for the event.
    Weak,
}

/// One participant of a synchronisation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncConstraint {
    /// Participating process.
    pub process: u32,
    /// Shared event identifier.
    pub event: u32,
    /// Strength of this process's participation.
    pub strength: Strength,
}

/// A synchronisation vector: one constraint per participating process.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncVector {
    constraints: SmallVec<[SyncConstraint; 4]>,
}

impl SyncVector {
    /// Builds a synchronisation vector from its participant constraints.
    pub fn new(constraints: impl IntoIterator<Item = SyncConstraint>) -> SyncVector {
        SyncVector {
            constraints: constraints.into_iter().collect(),
        }
    }

    /// The participant constraints.
    pub fn constraints(&self) -> &[SyncConstraint] {
        &self.constraints
    }
}

/// A location of one process: its flags and invariant bytecode.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationDef<B> {
    /// Owning process.
    pub process: u32,
    /// Display name, used in `dot`/`raw` output.
    pub name: String,
    /// True for a process's initial location(s); `initial_edges` combines one
    /// per process.
    pub initial: bool,
    /// True if no time may elapse while this location is active.
    pub committed: bool,
    /// True if no time may elapse while this location is active, distinct
    /// from `committed` only in how a model loader chooses to report it; the
    /// transition system treats both identically for delay admissibility.
    pub urgent: bool,
    /// Invariant bytecode, run against `intval` with a clock-constraint
    /// output buffer.
    pub invariant: B,
    /// Label identifiers attached to this location (indices into the
    /// system's label name table); a vloc's accepting labels are the union
    /// over its locations'.
    pub labels: SmallVec<[u32; 2]>,
}

/// An edge of one process.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeDef<B> {
    /// Owning process.
    pub process: u32,
    /// Source location.
    pub src: LocId,
    /// Target location.
    pub tgt: LocId,
    /// Shared event identifier, used to match synchronisation vectors.
    pub event: u32,
    /// Guard bytecode, run against `intval` with a clock-constraint output
    /// buffer.
    pub guard: B,
    /// Update bytecode, run against `intval` (mutated in place) with a
    /// clock-reset output buffer.
    pub update: B,
}

/// Declaration of a block of flat integer variables sharing one name (an
/// array of `count` scalars, each independently tracked in `Intval`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntVarDecl {
    /// Declared name, for diagnostics and `dot` output.
    pub name: String,
    /// Number of flat scalars this declaration contributes.
    pub count: usize,
    /// Inclusive lower bound shared by every scalar in the block.
    pub min: i32,
    /// Inclusive upper bound shared by every scalar in the block.
    pub max: i32,
    /// Initial value of each scalar, in declaration order.
    pub initial: Vec<i32>,
}

/// Declaration of a block of clocks sharing one name.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockDecl {
    /// Declared name, for diagnostics and `dot` output.
    pub name: String,
    /// Number of flat clocks this declaration contributes.
    pub count: usize,
}

/// A fully elaborated system, as produced by a model loader.
///
/// Generic over the bytecode representation `B`, which this module never
/// inspects; only a [`crate::vm::Vm<B>`] does.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct System<B> {
    process_names: Vec<String>,
    locations: Vec<LocationDef<B>>,
    edges: Vec<EdgeDef<B>>,
    syncs: Vec<SyncVector>,
    clocks: Vec<ClockDecl>,
    intvars: Vec<IntVarDecl>,
    label_names: Vec<String>,
}

impl<B> System<B> {
    /// Assembles a system from its parts. `locations` and `edges` are
    /// expected in no particular cross-process order; lookups filter by
    /// `process`/`src` at call time, which is adequate at the model sizes
    /// this core targets (no per-process index is pre-built).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        process_names: Vec<String>,
        locations: Vec<LocationDef<B>>,
        edges: Vec<EdgeDef<B>>,
        syncs: Vec<SyncVector>,
        clocks: Vec<ClockDecl>,
        intvars: Vec<IntVarDecl>,
        label_names: Vec<String>,
    ) -> System<B> {
        System {
            process_names,
            locations,
            edges,
            syncs,
            clocks,
            intvars,
            label_names,
        }
    }

    /// Number of processes.
    pub fn num_processes(&self) -> usize {
        self.process_names.len()
    }

    /// Display name of a process.
    pub fn process_name(&self, pid: u32) -> &str {
        &self.process_names[pid as usize]
    }

    /// Total number of flat clocks, not counting the reference clock; a DBM
    /// over this system has dimension `num_clocks() + 1`.
    pub fn num_clocks(&self) -> usize {
        self.clocks.iter().map(|c| c.count).sum()
    }

    /// Total number of flat integer variables.
    pub fn num_intvars(&self) -> usize {
        self.intvars.iter().map(|v| v.count).sum()
    }

    /// Initial values of every flat integer variable, in declaration order.
    pub fn initial_intvar_values(&self) -> Vec<i32> {
        self.intvars.iter().flat_map(|v| v.initial.clone()).collect()
    }

    /// Every declared location.
    pub fn locations(&self) -> &[LocationDef<B>] {
        &self.locations
    }

    /// Every declared edge.
    pub fn edges(&self) -> &[EdgeDef<B>] {
        &self.edges
    }

    /// Every declared synchronisation vector.
    pub fn syncs(&self) -> &[SyncVector] {
        &self.syncs
    }

    /// The label name table; a [`crate::labels::LabelSet`] for this system
    /// has width `label_names().len()`.
    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Clock name table, in flat-id order (index 0 is the reference clock,
    /// named `"0"` by convention, followed by the declared clocks).
    pub fn clock_names(&self) -> Vec<String> {
        let mut names = vec!["0".to_string()];
        for decl in &self.clocks {
            if decl.count == 1 {
                names.push(decl.name.clone());
            } else {
                names.extend((0..decl.count).map(|i| format!("{}[{i}]", decl.name)));
            }
        }
        names
    }

    /// Locations belonging to `process`, in declaration order.
    pub fn locations_of(&self, process: u32) -> impl Iterator<Item = (LocId, &LocationDef<B>)> {
        self.locations
            .iter()
            .enumerate()
            .filter(move |(_, l)| l.process == process)
            .map(|(i, l)| (i as LocId, l))
    }

    /// A location by process and id.
    pub fn location(&self, process: u32, loc: LocId) -> &LocationDef<B> {
        self.locations_of(process)
            .find(|(id, _)| *id == loc)
            .map(|(_, l)| l)
            .expect("location id must be valid for the given process")
    }

    /// Edges of `process` whose source is `loc`.
    pub fn edges_from(&self, process: u32, loc: LocId) -> impl Iterator<Item = &EdgeDef<B>> {
        self.edges
            .iter()
            .filter(move |e| e.process == process && e.src == loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_system() -> System<()> {
        System::new(
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
            vec![],
        )
    }

    #[test]
    fn num_clocks_counts_flat_slots() {
        let sys = tiny_system();
        assert_eq!(sys.num_clocks(), 1);
        assert_eq!(sys.clock_names(), vec!["0".to_string(), "x".to_string()]);
    }

    #[test]
    fn locations_of_filters_by_process() {
        let sys = tiny_system();
        let locs: Vec<_> = sys.locations_of(0).collect();
        assert_eq!(locs.len(), 1);
        assert_eq!(locs[0].1.name, "l0");
    }
}
