//! A pool of reference-counted cells.
//!
//! Rust's `Rc` already is the "intrusive reference count" the design calls for
//! (§9 "Cross-language remapping": *the language's own reference-counting
//! primitive on top of a pool*), so [`PoolRef`] is a thin `Rc` wrapper whose
//! `Drop` implementation returns the cell's logical slot to the owning pool's
//! free list. This gives RAII destruction (`destruct` is never called by hand)
//! while preserving the pool's block/free-list bookkeeping for statistics and
//! for `collect()` to (eventually) act on.

use std::cell::RefCell;
use std::ops::Deref;
use std::rc::{Rc, Weak};

struct PoolState {
    /// Number of cells constructed since the pool (or its last block) was
    /// created; incremented on every `construct`, never decremented.
    constructed: usize,
    /// Logical slots returned by a cell's destructor; their storage has
    /// already been freed by `Rc`, this list only tracks occupancy for stats.
    free: Vec<usize>,
    block_size: usize,
}

/// A pool of `T`-typed cells, handed out as reference-counted [`PoolRef`]s.
pub struct Pool<T> {
    state: Rc<RefCell<PoolState>>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Clone for Pool<T> {
    fn clone(&self) -> Self {
        Pool {
            state: Rc::clone(&self.state),
            _marker: std::marker::PhantomData,
        }
    }
}

struct Cell<T> {
    value: T,
    index: usize,
    pool: Weak<RefCell<PoolState>>,
}

impl<T> Drop for Cell<T> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.upgrade() {
            pool.borrow_mut().free.push(self.index);
        }
    }
}

/// A shared handle to a pool-allocated `T`. Clone increments the share count
/// (`Rc::clone`); the last clone dropped returns the cell to its pool.
pub struct PoolRef<T>(Rc<Cell<T>>);

impl<T> Clone for PoolRef<T> {
    fn clone(&self) -> Self {
        PoolRef(Rc::clone(&self.0))
    }
}

impl<T> Deref for PoolRef<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0.value
    }
}

impl<T> PoolRef<T> {
    /// Number of live shares of this cell (includes `self`).
    pub fn share_count(this: &PoolRef<T>) -> usize {
        Rc::strong_count(&this.0)
    }

    /// Pointer identity, stable for the lifetime of the cell; used by the
    /// hash-cons table to disambiguate canonical representatives.
    pub fn ptr_eq(a: &PoolRef<T>, b: &PoolRef<T>) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: PartialEq> PartialEq for PoolRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.value == other.0.value
    }
}
impl<T: Eq> Eq for PoolRef<T> {}

impl<T: std::hash::Hash> std::hash::Hash for PoolRef<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.value.hash(state)
    }
}

impl<T> Pool<T> {
    /// Creates a pool whose blocks conceptually hold `block_size` cells (used
    /// only for statistics; Rust's allocator already handles recycling).
    pub fn new(block_size: usize) -> Pool<T> {
        Pool {
            state: Rc::new(RefCell::new(PoolState {
                constructed: 0,
                free: Vec::new(),
                block_size,
            })),
            _marker: std::marker::PhantomData,
        }
    }

    /// Constructs a new cell holding `value`, with a fresh reference count of 1.
    pub fn construct(&self, value: T) -> PoolRef<T> {
        let index = {
            let mut state = self.state.borrow_mut();
            state.free.pop().unwrap_or_else(|| {
                let i = state.constructed;
                state.constructed += 1;
                i
            })
        };
        PoolRef(Rc::new(Cell {
            value,
            index,
            pool: Rc::downgrade(&self.state),
        }))
    }

    /// Number of cells currently live (constructed, not yet freed).
    pub fn live_count(&self) -> usize {
        let state = self.state.borrow();
        state.constructed - state.free.len()
    }

    /// Configured per-block cell count, reported for statistics.
    pub fn block_size(&self) -> usize {
        self.state.borrow().block_size
    }

    /// No-op: reserved for future compaction of fully-free blocks.
    pub fn collect(&self) {}
}
