//! Difference bounds: the scalar algebra difference bound matrices are built from.
//!
//! A bound `(strictness, value)` encodes a constraint `x - y # value` where `#` is
//! `<` for a strict bound and `<=` for a non-strict one. [`Bound::INFINITY`] encodes
//! "no constraint". Addition, negation, and the `<=` order on bounds are the only
//! primitives the DBM kernel needs; everything else (tightening, extrapolation) is
//! built from them.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// Widest value representable by a finite bound. Kept well away from `i32::MAX` so
/// that two finite bounds can always be added without overflow.
pub const MAX_VALUE: i32 = i32::MAX / 4;

/// A difference bound `(strictness, value)`, or the distinguished infinity bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    /// `None` encodes infinity; `Some((strict, value))` a finite bound.
    repr: Option<(bool, i32)>,
}

impl Bound {
    /// `(<, +infinity)`: no constraint at all.
    pub const INFINITY: Bound = Bound { repr: None };

    /// `(<=, 0)`: the tightest non-strict bound at zero.
    pub const LE_ZERO: Bound = Bound {
        repr: Some((false, 0)),
    };

    /// `(<, 0)`: the bound used to signal an empty zone on the diagonal.
    pub const LT_ZERO: Bound = Bound {
        repr: Some((true, 0)),
    };

    /// A non-strict bound `x - y <= value`.
    #[inline]
    pub fn le(value: i32) -> Bound {
        debug_assert!(value.abs() <= MAX_VALUE, "bound value out of range");
        Bound {
            repr: Some((false, value)),
        }
    }

    /// A strict bound `x - y < value`.
    #[inline]
    pub fn lt(value: i32) -> Bound {
        debug_assert!(value.abs() <= MAX_VALUE, "bound value out of range");
        Bound {
            repr: Some((true, value)),
        }
    }

    /// True for the infinity bound.
    #[inline]
    pub fn is_infinity(self) -> bool {
        self.repr.is_none()
    }

    /// True for a strict, finite bound.
    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self.repr, Some((true, _)))
    }

    /// The finite value, or `None` for infinity.
    #[inline]
    pub fn value(self) -> Option<i32> {
        self.repr.map(|(_, v)| v)
    }

    /// Bound obtained by swapping strictness (`<=` becomes `<` and vice versa),
    /// used when negating a constraint for the dual direction. Infinity is
    /// unaffected.
    #[inline]
    pub fn flip_strictness(self) -> Bound {
        match self.repr {
            None => Bound::INFINITY,
            Some((strict, v)) => Bound {
                repr: Some((!strict, v)),
            },
        }
    }
}

impl Add for Bound {
    type Output = Bound;

    /// `(s1,v1)+(s2,v2) = (min(s1,s2), v1+v2)`, infinity absorbing.
    #[inline]
    fn add(self, rhs: Bound) -> Bound {
        match (self.repr, rhs.repr) {
            (None, _) | (_, None) => Bound::INFINITY,
            (Some((s1, v1)), Some((s2, v2))) => Bound {
                repr: Some((s1 || s2, v1 + v2)),
            },
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bound {
    /// `(s1,v1) <= (s2,v2)` iff `v1<v2`, or `v1=v2` and (`s1` strict implies `s2`
    /// strict or `s1` non-strict). Infinity is the top element.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.repr, other.repr) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some((s1, v1)), Some((s2, v2))) => v1.cmp(&v2).then_with(|| {
                // At equal value, `<` is strictly tighter than `<=`.
                match (s1, s2) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                }
            }),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            None => write!(f, "<inf"),
            Some((true, v)) => write!(f, "<{v}"),
            Some((false, v)) => write!(f, "<={v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_absorbs_infinity() {
        assert_eq!(Bound::INFINITY + Bound::le(3), Bound::INFINITY);
        assert_eq!(Bound::le(3) + Bound::INFINITY, Bound::INFINITY);
    }

    #[test]
    fn addition_takes_weaker_strictness() {
        assert_eq!(Bound::le(2) + Bound::le(3), Bound::le(5));
        assert_eq!(Bound::lt(2) + Bound::le(3), Bound::lt(5));
        assert_eq!(Bound::le(2) + Bound::lt(3), Bound::lt(5));
        assert_eq!(Bound::lt(2) + Bound::lt(3), Bound::lt(5));
    }

    #[test]
    fn ordering_prefers_smaller_value_then_strictness() {
        assert!(Bound::le(2) < Bound::le(3));
        assert!(Bound::lt(3) < Bound::le(3));
        assert!(Bound::le(3) < Bound::INFINITY);
        assert_eq!(Bound::le(3).cmp(&Bound::le(3)), Ordering::Equal);
    }

    #[test]
    fn flip_strictness_preserves_value() {
        assert_eq!(Bound::le(4).flip_strictness(), Bound::lt(4));
        assert_eq!(Bound::lt(4).flip_strictness(), Bound::le(4));
        assert_eq!(Bound::INFINITY.flip_strictness(), Bound::INFINITY);
    }
}
