//! The DBM kernel: canonical-form arithmetic on matrices of difference bounds.
//!
//! A [`Dbm`] of dimension `dim` represents the zone `{ v : v_i - v_j # dbm[i,j] for
//! all i,j }`, clock `0` being the reference clock whose value is always zero.
//! Every constructor here produces either a tight DBM or the distinguished empty
//! representation (`dbm[0,0] < 0`); callers must not inspect an empty DBM's other
//! entries.

use super::bound::Bound;
use std::fmt;

/// Outcome of an operation that may collapse the zone to empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbmStatus {
    /// The result is the empty zone; the DBM must not be used except to be freed.
    Empty,
    /// The result is non-empty and tight.
    NonEmpty,
}

/// A single clock constraint `x_i - x_j # c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    /// Left-hand clock identifier.
    pub i: usize,
    /// Right-hand clock identifier.
    pub j: usize,
    /// Bound on `x_i - x_j`.
    pub bound: Bound,
}

impl Constraint {
    /// A constraint is diagonal iff both clocks are non-zero (neither is the
    /// reference clock).
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.i != 0 && self.j != 0
    }
}

/// A single clock reset `x_target := x_source + shift`.
///
/// `source == 0` denotes a reset to the constant `shift` (since the reference
/// clock is always zero); `shift == 0 && source == 0` is reset-to-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reset {
    /// Clock being reset; must be non-zero.
    pub target: usize,
    /// Source clock, or `0` for reset-to-constant.
    pub source: usize,
    /// Non-negative shift applied to the source.
    pub shift: i32,
}

impl Reset {
    /// Which of the four normal forms (§3.1) this reset is in, for documentation
    /// and testing purposes; the application logic does not need to branch on it.
    pub fn kind(&self) -> ResetKind {
        match (self.source == 0, self.shift == 0) {
            (true, true) => ResetKind::ToZero,
            (true, false) => ResetKind::ToConstant,
            (false, true) => ResetKind::ToClock,
            (false, false) => ResetKind::ToSum,
        }
    }
}

/// The four normal forms of a clock reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// `x := 0`
    ToZero,
    /// `x := k`, `k > 0`
    ToConstant,
    /// `x := y`
    ToClock,
    /// `x := y + k`, `k > 0`
    ToSum,
}

/// A container of resets, applied together as one atomic update.
///
/// A container is *safe* iff no clock is both a reset target and a reset source;
/// safe containers can be applied sequentially, in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetContainer {
    resets: Vec<Reset>,
}

impl ResetContainer {
    /// An empty container (identity update).
    pub fn new() -> Self {
        ResetContainer { resets: Vec::new() }
    }

    /// Appends a reset to the container.
    pub fn push(&mut self, reset: Reset) {
        self.resets.push(reset);
    }

    /// The resets in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Reset> {
        self.resets.iter()
    }

    /// True iff no clock appears both as a target and as a (non-constant) source.
    pub fn is_safe(&self) -> bool {
        let targets: std::collections::HashSet<usize> =
            self.resets.iter().map(|r| r.target).collect();
        self.resets
            .iter()
            .all(|r| r.source == 0 || !targets.contains(&r.source))
    }
}

/// A `dim x dim` difference bound matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dbm {
    dim: usize,
    entries: Vec<Bound>,
}

impl Dbm {
    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.dim && j < self.dim);
        i * self.dim + j
    }

    /// Dimension of the DBM (number of clocks, including the reference clock).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The bound on `x_i - x_j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Bound {
        self.entries[self.index(i, j)]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, b: Bound) {
        let idx = self.index(i, j);
        self.entries[idx] = b;
    }

    /// The universal zone: no constraint on any difference, except positivity
    /// (`x_i >= 0`) and the diagonal. Tight by construction.
    pub fn universal(dim: usize) -> Dbm {
        assert!(dim >= 1, "dimension must be at least 1");
        let mut dbm = Dbm {
            dim,
            entries: vec![Bound::INFINITY; dim * dim],
        };
        for i in 0..dim {
            dbm.set(i, i, Bound::LE_ZERO);
            dbm.set(0, i, Bound::LE_ZERO);
        }
        dbm
    }

    /// The universal zone restricted to `x_i >= 0` for all `i` (identical to
    /// [`Dbm::universal`] since positivity is already enforced there, kept as a
    /// distinct constructor per spec §4.1).
    pub fn universal_positive(dim: usize) -> Dbm {
        Dbm::universal(dim)
    }

    /// The single point where every clock is zero. Tight by construction.
    pub fn zero(dim: usize) -> Dbm {
        assert!(dim >= 1, "dimension must be at least 1");
        Dbm {
            dim,
            entries: vec![Bound::LE_ZERO; dim * dim],
        }
    }

    /// The empty zone sentinel: `dbm[0,0] < 0`. Not tight by construction; must
    /// only be used as an output value, never as an operand.
    pub fn empty(dim: usize) -> Dbm {
        assert!(dim >= 1, "dimension must be at least 1");
        let mut dbm = Dbm {
            dim,
            entries: vec![Bound::INFINITY; dim * dim],
        };
        dbm.set(0, 0, Bound::LT_ZERO);
        dbm
    }

    /// Cheap emptiness check: inspects only `dbm[0,0]`. Safe to use as the sole
    /// emptiness test on any DBM produced by this module, since every
    /// emptiness-producing operation sets this entry.
    #[inline]
    pub fn is_empty_0(&self) -> bool {
        self.get(0, 0) < Bound::LE_ZERO
    }

    /// `dbm[i,i] <= 0` for all `i`, and `dbm[0,i] <= 0` for all `i` (positivity).
    pub fn is_consistent(&self) -> bool {
        (0..self.dim).all(|i| self.get(i, i) <= Bound::LE_ZERO)
            && (0..self.dim).all(|i| self.get(0, i) <= Bound::LE_ZERO)
    }

    /// `dbm[i,j] <= dbm[i,k] + dbm[k,j]` for all `i,j,k`.
    pub fn is_tight(&self) -> bool {
        if self.is_empty_0() {
            return false;
        }
        for i in 0..self.dim {
            for j in 0..self.dim {
                for k in 0..self.dim {
                    if self.get(i, j) > self.get(i, k) + self.get(k, j) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// True iff this DBM equals [`Dbm::universal`] of the same dimension.
    pub fn is_universal(&self) -> bool {
        for i in 0..self.dim {
            for j in 0..self.dim {
                let expected = if i == j || i == 0 {
                    Bound::LE_ZERO
                } else {
                    Bound::INFINITY
                };
                if self.get(i, j) != expected {
                    return false;
                }
            }
        }
        true
    }

    /// True iff every valuation in the zone has every clock non-negative, i.e.
    /// `dbm[0,i] <= 0` for all `i` (already required for consistency, kept as a
    /// named predicate per spec §4.1).
    pub fn is_positive(&self) -> bool {
        (0..self.dim).all(|i| self.get(0, i) <= Bound::LE_ZERO)
    }

    /// Structural equality of two tight DBMs (element-wise).
    pub fn is_equal(&self, other: &Dbm) -> bool {
        self.dim == other.dim && self.entries == other.entries
    }

    /// Inclusion: every valuation of `self` is also a valuation of `other`.
    /// Equivalent to `self.dbm[i,j] <= other.dbm[i,j]` for all `i,j`, given both
    /// are tight.
    pub fn is_le(&self, other: &Dbm) -> bool {
        if self.dim != other.dim {
            return false;
        }
        if self.is_empty_0() {
            return true;
        }
        if other.is_empty_0() {
            return false;
        }
        (0..self.dim * self.dim).all(|k| self.entries[k] <= other.entries[k])
    }

    /// Full Floyd-Warshall closure. Returns [`DbmStatus::Empty`] (with `dbm[0,0]`
    /// set negative) if a negative cycle is found, otherwise [`DbmStatus::NonEmpty`]
    /// with the DBM tightened in place.
    pub fn tighten(&mut self) -> DbmStatus {
        let dim = self.dim;
        for k in 0..dim {
            for i in 0..dim {
                if self.get(i, k).is_infinity() {
                    continue;
                }
                for j in 0..dim {
                    let via = self.get(i, k) + self.get(k, j);
                    if via < self.get(i, j) {
                        self.set(i, j, via);
                    }
                }
            }
        }
        for i in 0..dim {
            if self.get(i, i) < Bound::LE_ZERO {
                self.set(0, 0, Bound::LT_ZERO);
                return DbmStatus::Empty;
            }
        }
        DbmStatus::NonEmpty
    }

    /// Incremental tightening through a single modified edge `(y,x)`, restoring
    /// tightness in O(dim^2) given the DBM was tight before the edge changed.
    pub fn tighten_incremental(&mut self, x: usize, y: usize) -> DbmStatus {
        let dim = self.dim;
        for u in 0..dim {
            let u_y = self.get(u, y);
            if u_y.is_infinity() {
                continue;
            }
            for v in 0..dim {
                let via = u_y + self.get(y, v);
                if via < self.get(u, v) {
                    self.set(u, v, via);
                }
            }
        }
        for u in 0..dim {
            let u_x = self.get(u, x);
            if u_x.is_infinity() {
                continue;
            }
            for v in 0..dim {
                let via = u_x + self.get(x, v);
                if via < self.get(u, v) {
                    self.set(u, v, via);
                }
            }
        }
        for i in 0..dim {
            if self.get(i, i) < Bound::LE_ZERO {
                self.set(0, 0, Bound::LT_ZERO);
                return DbmStatus::Empty;
            }
        }
        DbmStatus::NonEmpty
    }

    /// Applies `x_i - x_j # c` (`c` given as `bound`). If the new bound is not
    /// strictly tighter than the current one, does nothing. Otherwise installs it
    /// and restores tightness incrementally through edge `(j,i)`.
    pub fn constrain(&mut self, i: usize, j: usize, bound: Bound) -> DbmStatus {
        if self.is_empty_0() {
            return DbmStatus::Empty;
        }
        if bound >= self.get(i, j) {
            return DbmStatus::NonEmpty;
        }
        self.set(i, j, bound);
        self.tighten_incremental(i, j)
    }

    /// Applies every constraint in `constraints` in order, short-circuiting as
    /// soon as the zone becomes empty.
    pub fn constrain_all(&mut self, constraints: &[Constraint]) -> DbmStatus {
        for c in constraints {
            if self.constrain(c.i, c.j, c.bound) == DbmStatus::Empty {
                return DbmStatus::Empty;
            }
        }
        DbmStatus::NonEmpty
    }

    /// Resets a single clock to the constant `k` (`k >= 0`). Tight by
    /// construction given the input was tight.
    fn reset_to_constant(&mut self, x: usize, k: i32) {
        debug_assert!(x != 0, "cannot reset the reference clock");
        debug_assert!(k >= 0, "reset-to-constant requires a non-negative value");
        self.set(x, 0, Bound::le(k));
        self.set(0, x, Bound::le(-k));
        for y in 0..self.dim {
            if y == x || y == 0 {
                continue;
            }
            let to_y = self.get(0, y) + Bound::le(k);
            let from_y = self.get(y, 0) + Bound::le(-k);
            self.set(x, y, to_y);
            self.set(y, x, from_y);
        }
    }

    /// Resets clock `x` to clock `y`'s current value: copies `y`'s row/column
    /// into `x` and sets the diagonal to zero.
    fn reset_to_clock(&mut self, x: usize, y: usize) {
        debug_assert!(x != 0, "cannot reset the reference clock");
        for z in 0..self.dim {
            if z == x {
                continue;
            }
            let to_z = self.get(y, z);
            let from_z = self.get(z, y);
            self.set(x, z, to_z);
            self.set(z, x, from_z);
        }
        self.set(x, x, Bound::LE_ZERO);
    }

    /// Resets clock `x` to `y + k` (`k >= 0`): `y`'s row/column shifted by `k`.
    fn reset_to_sum(&mut self, x: usize, y: usize, k: i32) {
        debug_assert!(x != 0, "cannot reset the reference clock");
        debug_assert!(k >= 0, "reset-to-sum requires a non-negative shift");
        for z in 0..self.dim {
            if z == x {
                continue;
            }
            let to_z = self.get(y, z) + Bound::le(k);
            let from_z = self.get(z, y) + Bound::le(-k);
            self.set(x, z, to_z);
            self.set(z, x, from_z);
        }
        self.set(x, x, Bound::LE_ZERO);
    }

    /// Applies one reset in place, dispatching on its normal form.
    fn apply_one_reset(&mut self, r: &Reset) {
        match r.kind() {
            ResetKind::ToZero => self.reset_to_constant(r.target, 0),
            ResetKind::ToConstant => self.reset_to_constant(r.target, r.shift),
            ResetKind::ToClock => self.reset_to_clock(r.target, r.source),
            ResetKind::ToSum => self.reset_to_sum(r.target, r.source, r.shift),
        }
    }

    /// Applies a reset container. Safe containers are applied in order, in
    /// place. Unsafe containers are computed from the untouched input DBM: for
    /// each reset `target := source + shift`, and every other reset or
    /// unaffected clock `z`, the new entry is derived from the matching old
    /// entry via the affine shift, then the whole result is tightened.
    pub fn apply_reset(&mut self, resets: &ResetContainer) -> DbmStatus {
        if self.is_empty_0() {
            return DbmStatus::Empty;
        }
        if resets.is_safe() {
            for r in resets.iter() {
                self.apply_one_reset(r);
            }
            return DbmStatus::NonEmpty;
        }

        let old = self.clone();
        let shift_of = |clock: usize| -> (usize, i32) {
            resets
                .iter()
                .find(|r| r.target == clock)
                .map(|r| (r.source, r.shift))
                .unwrap_or((clock, 0))
        };
        for xp in 0..self.dim {
            let (xs, xv) = shift_of(xp);
            for yp in 0..self.dim {
                let (ys, yv) = shift_of(yp);
                let new_bound = old.get(xs, ys) + Bound::le(xv - yv);
                self.set(xp, yp, new_bound);
            }
        }
        self.tighten()
    }

    /// Time elapse: for all `i > 0`, removes the upper bound on `x_i - x_0`.
    /// Preserves tightness.
    pub fn open_up(&mut self) {
        for i in 1..self.dim {
            self.set(i, 0, Bound::INFINITY);
        }
    }

    /// Element-wise minimum of two DBMs of equal dimension, then re-tightened.
    /// `DbmStatus::Empty` if either input is empty or the intersection has a
    /// negative diagonal.
    pub fn intersection(a: &Dbm, b: &Dbm) -> (Dbm, DbmStatus) {
        assert_eq!(a.dim, b.dim, "intersection requires equal dimensions");
        if a.is_empty_0() || b.is_empty_0() {
            return (Dbm::empty(a.dim), DbmStatus::Empty);
        }
        let mut out = Dbm {
            dim: a.dim,
            entries: a
                .entries
                .iter()
                .zip(b.entries.iter())
                .map(|(x, y)| (*x).min(*y))
                .collect(),
        };
        let status = out.tighten();
        (out, status)
    }

    /// `ExtraM`: drops any bound exceeding the per-clock maximum `m(i)`, and any
    /// lower bound `-dbm[j,0]` exceeding `m(j)` (in which case the weakest bound
    /// consistent with the clock being unbounded above `m(j)` is installed).
    pub fn extra_m(&mut self, bounds: &[i32]) {
        self.extra_lu(bounds, bounds)
    }

    /// `ExtraM+`: as `ExtraM`, additionally lowers any bound above `m(i)` down to
    /// exactly `m(i)`, which is sound because such bounds can never be witnessed
    /// by a clock-bounded model and merging them loses no reachable class.
    pub fn extra_m_plus(&mut self, bounds: &[i32]) {
        self.extra_lu_plus(bounds, bounds)
    }

    /// `ExtraLU`: per-clock independent lower (`l`) and upper (`u`) bound maps.
    pub fn extra_lu(&mut self, l: &[i32], u: &[i32]) {
        let dim = self.dim;
        for i in 0..dim {
            for j in 0..dim {
                if i == j {
                    continue;
                }
                let dij = self.get(i, j);
                let dji = self.get(j, i);
                let upper_i = if i == 0 { i32::MIN } else { u[i] };
                let lower_j = if j == 0 { i32::MIN } else { l[j] };
                let exceeds_upper = dij.value().is_some_and(|v| v > upper_i) && i != 0;
                let exceeds_lower = dji.value().is_some_and(|v| -v > lower_j) && j != 0;
                if exceeds_upper {
                    self.set(i, j, Bound::INFINITY);
                } else if exceeds_lower {
                    if i == 0 {
                        self.set(i, j, Bound::lt(-lower_j));
                    } else {
                        self.set(i, j, Bound::INFINITY);
                    }
                }
            }
        }
        self.tighten();
    }

    /// `ExtraLU+`: as `ExtraLU`, additionally lowers bounds above `u(i)` to `u(i)`.
    pub fn extra_lu_plus(&mut self, l: &[i32], u: &[i32]) {
        let dim = self.dim;
        for i in 1..dim {
            for j in 0..dim {
                if i == j {
                    continue;
                }
                if let Some(v) = self.get(i, j).value() {
                    if v > u[i] {
                        self.set(i, j, Bound::le(u[i]));
                    }
                }
            }
        }
        self.extra_lu(l, u);
    }

    /// Whether `self <= aLU(other, l, u)` without materialising the abstraction,
    /// following the Herbreteau-Srivathsan-Walukiewicz point-wise
    /// characterisation: for every `i,j`, either `self[i,j] <= other[i,j]`, or
    /// `other[i,j]` can be safely relaxed (it exceeds the upper bound of `i`), or
    /// the opposite diagonal can be safely relaxed (it exceeds the lower bound of
    /// `j`).
    pub fn is_alu_le(&self, other: &Dbm, l: &[i32], u: &[i32]) -> bool {
        if self.is_empty_0() {
            return true;
        }
        if other.is_empty_0() {
            return false;
        }
        let dim = self.dim;
        for i in 0..dim {
            for j in 0..dim {
                if self.get(i, j) <= other.get(i, j) {
                    continue;
                }
                let upper_i = if i == 0 { i32::MAX } else { u[i] };
                let lower_j = if j == 0 { i32::MAX } else { l[j] };
                let relax_upper = self.get(i, j).value().is_some_and(|v| v > upper_i);
                let relax_lower = (-self.get(j, i).value().unwrap_or(i32::MIN)) > lower_j;
                if relax_upper || relax_lower {
                    continue;
                }
                return false;
            }
        }
        true
    }

    /// `aM` inclusion: the special case of `aLU` with `l = u = m`.
    pub fn is_am_le(&self, other: &Dbm, m: &[i32]) -> bool {
        self.is_alu_le(other, m, m)
    }
}

impl fmt::Display for Dbm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty_0() {
            return write!(f, "empty");
        }
        let mut first = true;
        for i in 0..self.dim {
            for j in 0..self.dim {
                if i == j {
                    continue;
                }
                let b = self.get(i, j);
                if b.is_infinity() {
                    continue;
                }
                if !first {
                    write!(f, " & ")?;
                }
                first = false;
                write!(f, "x{i}-x{j}{b}")?;
            }
        }
        if first {
            write!(f, "true")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universal_is_tight_and_universal() {
        let dbm = Dbm::universal(3);
        assert!(dbm.is_tight());
        assert!(dbm.is_universal());
        assert!(!dbm.is_empty_0());
    }

    #[test]
    fn zero_point_is_tight() {
        let dbm = Dbm::zero(3);
        assert!(dbm.is_tight());
        assert!(dbm.is_consistent());
        for i in 0..3 {
            assert_eq!(dbm.get(i, 0), Bound::LE_ZERO);
            assert_eq!(dbm.get(0, i), Bound::LE_ZERO);
        }
    }

    #[test]
    fn empty_sentinel_is_detected_cheaply() {
        let dbm = Dbm::empty(2);
        assert!(dbm.is_empty_0());
    }

    #[test]
    fn constrain_then_tight() {
        let mut dbm = Dbm::universal(2);
        assert_eq!(dbm.constrain(1, 0, Bound::le(5)), DbmStatus::NonEmpty);
        assert!(dbm.is_tight());
        assert_eq!(dbm.get(1, 0), Bound::le(5));
    }

    #[test]
    fn constrain_to_contradiction_is_empty() {
        let mut dbm = Dbm::zero(2);
        // x1 - x0 <= 0 already (zero point); forcing x1 - x0 < 0 is unsatisfiable.
        assert_eq!(dbm.constrain(1, 0, Bound::lt(0)), DbmStatus::Empty);
        assert!(dbm.is_empty_0());
    }

    #[test]
    fn reset_to_constant_then_to_clock() {
        let mut dbm = Dbm::zero(3);
        dbm.open_up();
        dbm.constrain(1, 0, Bound::le(5));
        dbm.constrain(0, 1, Bound::le(-3)); // x1 in [3,5]
        assert!(dbm.is_tight());

        let mut copy = dbm.clone();
        let mut resets = ResetContainer::new();
        resets.push(Reset {
            target: 2,
            source: 1,
            shift: 0,
        });
        assert_eq!(copy.apply_reset(&resets), DbmStatus::NonEmpty);
        assert_eq!(copy.get(2, 0), dbm.get(1, 0));
        assert_eq!(copy.get(0, 2), dbm.get(0, 1));
    }

    #[test]
    fn unsafe_container_matches_sequential_semantics_via_buffering() {
        // x := y; y := 3.  Not safe (y is both source and target... actually here
        // x is target with source y, y is target with source 0): unsafe because
        // y is a source for x's reset and also a target.
        let mut dbm = Dbm::zero(3);
        dbm.open_up();
        dbm.constrain(1, 0, Bound::le(5)); // y <= 5
        dbm.tighten();

        let mut resets = ResetContainer::new();
        resets.push(Reset {
            target: 2,
            source: 1,
            shift: 0,
        }); // x := y
        resets.push(Reset {
            target: 1,
            source: 0,
            shift: 3,
        }); // y := 3
        assert!(!resets.is_safe());

        let mut result = dbm.clone();
        assert_eq!(result.apply_reset(&resets), DbmStatus::NonEmpty);
        // x should carry the OLD value of y (<=5), not the new one (=3).
        assert_eq!(result.get(2, 0), Bound::le(5));
        assert_eq!(result.get(1, 0), Bound::le(3));
    }

    #[test]
    fn open_up_is_idempotent_up_to_tightening() {
        let mut dbm = Dbm::zero(2);
        dbm.open_up();
        let once = dbm.clone();
        dbm.open_up();
        dbm.tighten();
        assert_eq!(dbm, once);
    }

    #[test]
    fn intersection_with_self_is_self() {
        let mut dbm = Dbm::zero(2);
        dbm.open_up();
        dbm.constrain(1, 0, Bound::le(5));
        let (out, status) = Dbm::intersection(&dbm, &dbm);
        assert_eq!(status, DbmStatus::NonEmpty);
        assert!(out.is_equal(&dbm));
    }

    #[test]
    fn intersection_with_universal_is_self() {
        let mut dbm = Dbm::zero(3);
        dbm.open_up();
        dbm.constrain(1, 0, Bound::le(5));
        let universal = Dbm::universal(3);
        let (out, status) = Dbm::intersection(&dbm, &universal);
        assert_eq!(status, DbmStatus::NonEmpty);
        assert!(out.is_equal(&dbm));
    }

    #[test]
    fn anti_symmetry_of_inclusion() {
        let mut a = Dbm::zero(2);
        a.open_up();
        a.constrain(1, 0, Bound::le(5));
        let b = a.clone();
        assert!(a.is_le(&b) && b.is_le(&a));
        assert!(a.is_equal(&b));
    }

    #[test]
    fn extra_m_is_idempotent_and_weakens() {
        let mut dbm = Dbm::zero(2);
        dbm.open_up();
        dbm.constrain(1, 0, Bound::le(10));
        let bounds = [0, 3];
        let before = dbm.clone();
        dbm.extra_m(&bounds);
        assert!(before.is_le(&dbm));
        let once = dbm.clone();
        dbm.extra_m(&bounds);
        assert_eq!(dbm, once);
    }

    #[test]
    fn alu_inclusion_matches_materialised_extrapolation_on_a_simple_case() {
        let mut a = Dbm::zero(2);
        a.open_up();
        a.constrain(1, 0, Bound::le(1));

        let mut b = Dbm::zero(2);
        b.open_up();
        b.constrain(1, 0, Bound::le(10));

        let l = [0, 2];
        let u = [0, 2];
        assert!(a.is_alu_le(&b, &l, &u));

        let mut extrapolated_b = b.clone();
        extrapolated_b.extra_lu(&l, &u);
        assert!(a.is_le(&extrapolated_b));
    }
}
