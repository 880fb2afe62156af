//! Error taxonomy for the verification core.
//!
//! Per the design, most "failures" in this crate are not Rust errors: a transition
//! that violates a guard or an invariant is an expected outcome of exploring a
//! timed automaton and is represented by [`StateStatus`], a plain value threaded
//! back to the caller. [`FatalError`] is reserved for the conditions that are
//! genuinely exceptional: resource exhaustion, or a caller violating one of the
//! invariants documented on the DBM kernel and pool.

use std::fmt;

/// Outcome of a transition-system operation (`initial`, `next`, `prev`).
///
/// Exactly one of these is returned by every call; the exploration algorithms
/// filter on this value rather than treating it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateStatus {
    /// The operation produced a valid state.
    Ok,
    /// An integer-variable source invariant failed to hold.
    IntvarsSrcInvariantViolated,
    /// An integer-variable guard failed to hold.
    IntvarsGuardViolated,
    /// An update statement signalled failure (e.g. a predicate violation in the VM).
    IntvarsStatementFailed,
    /// An integer-variable target invariant failed to hold.
    IntvarsTgtInvariantViolated,
    /// The clock source invariant made the zone empty.
    ClocksSrcInvariantViolated,
    /// The clock guard made the zone empty.
    ClocksGuardViolated,
    /// The clock target invariant made the zone empty.
    ClocksTgtInvariantViolated,
    /// A reset container could not be applied (dimension mismatch, unsafe misuse).
    ClocksResetFailed,
    /// The asynchronous-zone synchronization made the zone empty.
    ClocksEmptySync,
    /// `prev` found no predecessor consistent with the given transition.
    IncompatibleEdge,
}

impl StateStatus {
    /// True for [`StateStatus::Ok`], the only status the default exploration mask keeps.
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, StateStatus::Ok)
    }
}

impl fmt::Display for StateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateStatus::Ok => "ok",
            StateStatus::IntvarsSrcInvariantViolated => "intvars source invariant violated",
            StateStatus::IntvarsGuardViolated => "intvars guard violated",
            StateStatus::IntvarsStatementFailed => "intvars statement failed",
            StateStatus::IntvarsTgtInvariantViolated => "intvars target invariant violated",
            StateStatus::ClocksSrcInvariantViolated => "clocks source invariant violated",
            StateStatus::ClocksGuardViolated => "clocks guard violated",
            StateStatus::ClocksTgtInvariantViolated => "clocks target invariant violated",
            StateStatus::ClocksResetFailed => "clocks reset failed",
            StateStatus::ClocksEmptySync => "clocks synchronization emptied the zone",
            StateStatus::IncompatibleEdge => "incompatible edge",
        };
        f.write_str(s)
    }
}

/// Programming-error-class failures that unwind to the driver instead of being
/// represented as values.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// A pool ran out of free cells and the caller declined to grow it.
    #[error("pool exhausted: no free cell available in a block of size {block_size}")]
    PoolExhausted {
        /// Configured block size of the exhausted pool.
        block_size: usize,
    },
    /// Two zones of different dimension were combined.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension required by the operation.
        expected: usize,
        /// Dimension actually supplied.
        found: usize,
    },
    /// A reset container violated one of its normal-form invariants.
    #[error("invalid reset: {reason}")]
    InvalidReset {
        /// Human-readable description of the violated invariant.
        reason: &'static str,
    },
    /// A container of resets was applied in place despite being unsafe.
    #[error("unsafe reset container applied in place (target clock `{clock}` is also a source)")]
    UnsafeResetInPlace {
        /// Identifier of the clock that is both a target and a source.
        clock: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_the_only_status_considered_ok() {
        assert!(StateStatus::Ok.is_ok());
        assert!(!StateStatus::IntvarsGuardViolated.is_ok());
        assert!(!StateStatus::IncompatibleEdge.is_ok());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(StateStatus::Ok.to_string(), "ok");
        assert_eq!(
            StateStatus::ClocksGuardViolated.to_string(),
            "clocks guard violated"
        );
    }
}
