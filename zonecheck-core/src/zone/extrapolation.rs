//! Extrapolation policy: the tagged-variant analogue of dynamic dispatch on
//! abstraction choice (§9 "Cross-language remapping").

use crate::dbm::Dbm;

/// Per-clock bound map, one entry per clock identifier (entry `0` is unused,
/// kept for direct indexing by clock id).
#[derive(Debug, Clone)]
pub struct ClockBounds {
    /// Upper bound `u(i)` for each clock, used by `ExtraM`/`ExtraLU`.
    pub upper: Vec<i32>,
    /// Lower bound `l(i)` for each clock, used by `ExtraLU`. Equal to `upper`
    /// for the `ExtraM` family.
    pub lower: Vec<i32>,
}

impl ClockBounds {
    /// Bounds where `l = u` (the `M` family).
    pub fn from_max(max: Vec<i32>) -> ClockBounds {
        ClockBounds {
            lower: max.clone(),
            upper: max,
        }
    }

    /// Independent lower/upper bounds (the `LU` family).
    pub fn from_lu(lower: Vec<i32>, upper: Vec<i32>) -> ClockBounds {
        assert_eq!(lower.len(), upper.len());
        ClockBounds { lower, upper }
    }

    /// No bounds at all: a policy using these never tightens anything.
    pub fn unbounded(dim: usize) -> ClockBounds {
        ClockBounds {
            lower: vec![i32::MAX; dim],
            upper: vec![i32::MAX; dim],
        }
    }
}

/// Which extrapolation operator to apply after each `next()`, and at which
/// granularity (`global`: one bound map for the whole system; `local`: bounds
/// may vary per location, already folded into the [`ClockBounds`] the caller
/// supplies per call).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrapolationPolicy {
    /// No abstraction: the zone graph may not terminate on unbounded models.
    None,
    /// `ExtraM`.
    ExtraM,
    /// `ExtraM+`.
    ExtraMPlus,
    /// `ExtraLU`.
    ExtraLu,
    /// `ExtraLU+`.
    ExtraLuPlus,
}

impl ExtrapolationPolicy {
    /// Applies this policy's operator to `dbm` in place.
    pub fn apply(&self, dbm: &mut Dbm, bounds: &ClockBounds) {
        match self {
            ExtrapolationPolicy::None => {}
            ExtrapolationPolicy::ExtraM => dbm.extra_m(&bounds.upper),
            ExtrapolationPolicy::ExtraMPlus => dbm.extra_m_plus(&bounds.upper),
            ExtrapolationPolicy::ExtraLu => dbm.extra_lu(&bounds.lower, &bounds.upper),
            ExtrapolationPolicy::ExtraLuPlus => dbm.extra_lu_plus(&bounds.lower, &bounds.upper),
        }
    }
}
