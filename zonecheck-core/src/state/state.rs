//! The composed state: a pool-allocated aggregate of a vloc, an intval, and a
//! zone (§3.4, §4.3).

use super::combine::combine;
use super::intval::Intval;
use super::vloc::Vloc;
use crate::labels::LabelSet;
use crate::pool::PoolRef;
use crate::zone::Zone;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A zone-graph state: `(vloc, intval, zone)`, each drawn from its own pool and
/// shared by reference once interned.
#[derive(Clone)]
pub struct State {
    vloc: PoolRef<Vloc>,
    intval: PoolRef<Intval>,
    zone: PoolRef<Zone>,
    /// Accepting labels derived from the locations in `vloc`, cached at
    /// construction since it never changes for an interned state.
    labels: LabelSet,
}

impl State {
    /// Builds a state from its three components and its derived label set.
    /// Called before interning; the hash-cons table may discard this instance
    /// in favor of an existing canonical representative.
    pub fn new(vloc: PoolRef<Vloc>, intval: PoolRef<Intval>, zone: PoolRef<Zone>, labels: LabelSet) -> State {
        State {
            vloc,
            intval,
            zone,
            labels,
        }
    }

    /// The location tuple.
    pub fn vloc(&self) -> &Vloc {
        &self.vloc
    }

    /// The integer-variable valuation.
    pub fn intval(&self) -> &Intval {
        &self.intval
    }

    /// The clock zone.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// The accepting-label bitset.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        *self.vloc == *other.vloc && *self.intval == *other.intval && self.zone.equals(&other.zone)
    }
}
impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut seed = 0u64;
        seed = combine(seed, &*self.vloc);
        seed = combine(seed, &*self.intval);
        seed = combine(seed, &*self.zone);
        seed.hash(state);
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State {{ vloc: {}, intval: {}, zone: {} }}",
            *self.vloc, *self.intval, self.zone.dbm()
        )
    }
}
