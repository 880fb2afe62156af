//! The ordinary (synchronous) zone: a thin wrapper over a tight [`Dbm`].

use crate::dbm::{Bound, Constraint, Dbm, DbmStatus, ResetContainer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A convex set of clock valuations, represented by a tight (or empty) DBM.
///
/// `Zone` never exposes a non-tight, non-empty DBM to callers: every constructor
/// and mutator here re-establishes tightness before returning.
#[derive(Debug, Clone)]
pub struct Zone {
    dbm: Dbm,
}

impl Zone {
    /// Wraps an already-tight (or empty) DBM. Debug builds assert the invariant.
    pub fn from_dbm(dbm: Dbm) -> Zone {
        debug_assert!(dbm.is_empty_0() || dbm.is_tight(), "zone DBM must be tight");
        Zone { dbm }
    }

    /// The zone containing every non-negative clock valuation.
    pub fn universal_positive(dim: usize) -> Zone {
        Zone {
            dbm: Dbm::universal_positive(dim),
        }
    }

    /// The single valuation where every clock is zero.
    pub fn zero(dim: usize) -> Zone {
        Zone { dbm: Dbm::zero(dim) }
    }

    /// The dimension (number of clocks, including the reference clock).
    pub fn dim(&self) -> usize {
        self.dbm.dim()
    }

    /// Read-only access to the underlying tight DBM.
    pub fn dbm(&self) -> &Dbm {
        &self.dbm
    }

    /// True iff the zone contains no valuation.
    pub fn is_empty(&self) -> bool {
        self.dbm.is_empty_0()
    }

    /// True iff the zone is the positive universal zone.
    pub fn is_universal_positive(&self) -> bool {
        self.dbm.is_universal() && self.dbm.is_positive()
    }

    /// Structural equality under tightness.
    pub fn equals(&self, other: &Zone) -> bool {
        self.dbm.is_equal(&other.dbm)
    }

    /// Set inclusion: every valuation of `self` is a valuation of `other`.
    pub fn le(&self, other: &Zone) -> bool {
        self.dbm.is_le(&other.dbm)
    }

    /// `aM`-abstraction inclusion against the given per-clock maxima.
    pub fn is_am_le(&self, other: &Zone, m: &[i32]) -> bool {
        self.dbm.is_am_le(&other.dbm, m)
    }

    /// `aLU`-abstraction inclusion against the given per-clock lower/upper bounds.
    pub fn is_alu_le(&self, other: &Zone, l: &[i32], u: &[i32]) -> bool {
        self.dbm.is_alu_le(&other.dbm, l, u)
    }

    /// Intersects `self` with a single clock constraint. Returns the resulting
    /// status; on [`DbmStatus::Empty`] the zone is replaced by the empty zone.
    pub fn constrain(&mut self, i: usize, j: usize, bound: Bound) -> DbmStatus {
        let status = self.dbm.constrain(i, j, bound);
        if status == DbmStatus::Empty {
            self.dbm = Dbm::empty(self.dbm.dim());
        }
        status
    }

    /// Intersects `self` with every constraint in `constraints`, in order.
    pub fn constrain_all(&mut self, constraints: &[Constraint]) -> DbmStatus {
        let status = self.dbm.constrain_all(constraints);
        if status == DbmStatus::Empty {
            self.dbm = Dbm::empty(self.dbm.dim());
        }
        status
    }

    /// Applies a reset container.
    pub fn apply_reset(&mut self, resets: &ResetContainer) -> DbmStatus {
        let status = self.dbm.apply_reset(resets);
        if status == DbmStatus::Empty {
            self.dbm = Dbm::empty(self.dbm.dim());
        }
        status
    }

    /// Elapses time: removes upper bounds on every clock but the reference clock.
    pub fn open_up(&mut self) {
        self.dbm.open_up();
    }

    /// Intersection of two zones.
    pub fn intersection(a: &Zone, b: &Zone) -> (Zone, DbmStatus) {
        let (dbm, status) = Dbm::intersection(&a.dbm, &b.dbm);
        (Zone { dbm }, status)
    }

    /// Applies extrapolation according to `policy`.
    pub fn extrapolate(&mut self, policy: super::ExtrapolationPolicy, bounds: &super::ClockBounds) {
        policy.apply(&mut self.dbm, bounds);
    }

    /// Lexicographic order on the flattened tight DBM, used to give the
    /// exploration algorithms a deterministic iteration order.
    pub fn lexicographic_cmp(&self, other: &Zone) -> Ordering {
        self.dbm.dim().cmp(&other.dbm.dim()).then_with(|| {
            (0..self.dbm.dim() * self.dbm.dim())
                .map(|k| {
                    let i = k / self.dbm.dim();
                    let j = k % self.dbm.dim();
                    self.dbm.get(i, j).cmp(&other.dbm.get(i, j))
                })
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Renders the zone as a minimal conjunction of bounds against a clock-name
    /// index, for the `dot`/`raw` output formats.
    pub fn to_string_with_names(&self, names: &[String]) -> String {
        if self.is_empty() {
            return "false".to_string();
        }
        let mut parts = Vec::new();
        let dim = self.dbm.dim();
        for i in 0..dim {
            for j in 0..dim {
                if i == j {
                    continue;
                }
                let b = self.dbm.get(i, j);
                if b.is_infinity() {
                    continue;
                }
                let lhs = if i == 0 {
                    format!("-{}", names[j])
                } else if j == 0 {
                    names[i].clone()
                } else {
                    format!("{}-{}", names[i], names[j])
                };
                let op = if b.is_strict() { "<" } else { "<=" };
                parts.push(format!("{lhs}{op}{}", b.value().unwrap_or_default()));
            }
        }
        if parts.is_empty() {
            "true".to_string()
        } else {
            parts.join(" & ")
        }
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
impl Eq for Zone {}

impl Hash for Zone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dbm.dim().hash(state);
        if self.is_empty() {
            // All empty zones of a given dimension hash identically; there is
            // exactly one canonical empty representative per dimension.
            i32::MIN.hash(state);
            return;
        }
        for i in 0..self.dbm.dim() {
            for j in 0..self.dbm.dim() {
                self.dbm.get(i, j).value().hash(state);
                self.dbm.get(i, j).is_strict().hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_zone_is_not_empty_and_not_universal() {
        let z = Zone::zero(2);
        assert!(!z.is_empty());
        assert!(!z.is_universal_positive());
    }

    #[test]
    fn equal_zones_hash_equal() {
        use std::collections::hash_map::DefaultHasher;
        let a = Zone::zero(2);
        let b = Zone::zero(2);
        assert_eq!(a, b);
        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn constrain_to_empty_keeps_dimension() {
        let mut z = Zone::zero(2);
        assert_eq!(z.constrain(1, 0, Bound::lt(0)), DbmStatus::Empty);
        assert!(z.is_empty());
        assert_eq!(z.dim(), 2);
    }

    #[test]
    fn names_rendering_is_readable() {
        let mut z = Zone::zero(2);
        z.open_up();
        z.constrain(1, 0, Bound::le(3));
        z.constrain(0, 1, Bound::le(0));
        let s = z.to_string_with_names(&["0".to_string(), "x".to_string()]);
        assert!(s.contains("x<=3"));
    }
}
