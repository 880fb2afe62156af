//! The two time-elapse disciplines a transition system can use (§4.5 step 7).

/// When time elapse (`open_up`) is applied relative to guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantics {
    /// Elapses in the source state, before evaluating guards (step order
    /// 1,7,2,3,...): a transition can only use clock values already reachable
    /// by waiting in the source location.
    Standard,
    /// Elapses eagerly in the freshly computed target state (step order
    /// 1,2,3,...,7): guards see only the exact values at firing time.
    Elapsed,
}
