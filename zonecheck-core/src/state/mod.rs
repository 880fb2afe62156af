//! State composition: the aggregate `(vloc, intval, zone)` type, its hash
//! combination, and the transition data used to build successors.

mod combine;
mod intval;
mod state;
mod transition;
mod vloc;

pub use combine::combine;
pub use intval::Intval;
pub use state::State;
pub use transition::{SyncId, Transition, Vedge};
pub use vloc::{LocId, Vloc};
