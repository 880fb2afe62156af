//! Canonical-form arithmetic on difference bound matrices (§4.1).

mod bound;
mod matrix;

pub use bound::{Bound, MAX_VALUE};
pub use matrix::{Constraint, Dbm, DbmStatus, Reset, ResetContainer, ResetKind};
