//! Zones: the clock component of a state, and the asynchronous reference-clock
//! variant used when processes need not tighten clock differences that never
//! participate in a synchronization (§4.2).

mod async_zone;
mod extrapolation;
mod sync;

pub use async_zone::RefZone;
pub use extrapolation::{ClockBounds, ExtrapolationPolicy};
pub use sync::Zone;
