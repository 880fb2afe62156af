//! Block-allocated pool with intrusive, reference-counted, shareable cells
//! (§4.4), and the hash-cons table built on top of it.

mod interner;
mod pool_impl;

pub use interner::HashCons;
pub use pool_impl::{Pool, PoolRef};
