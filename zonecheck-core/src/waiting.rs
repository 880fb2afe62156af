//! Waiting containers (§4.6.2 "Waiting container contract"): FIFO/LIFO
//! worklists supporting O(1) logical removal, matching tchecker's
//! `fast_remove_waiting_t` pattern (`waiting.hh`): an inactive node is never
//! returned, but its physical removal is deferred until it reaches the head.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

struct Entry<T> {
    value: T,
    active: Cell<bool>,
}

/// A handle to a value pushed onto a waiting container. Cloning is cheap
/// (`Rc::clone`); any clone can mark the entry inactive, which is how the
/// covering-reachability algorithm retires a subsumed node without touching
/// the container it may no longer have direct access to.
pub struct Handle<T>(Rc<Entry<T>>);

impl<T> Handle<T> {
    fn new(value: T) -> Handle<T> {
        Handle(Rc::new(Entry {
            value,
            active: Cell::new(true),
        }))
    }

    /// The held value.
    pub fn get(&self) -> &T {
        &self.0.value
    }

    /// Marks this entry inactive: it will be skipped rather than returned,
    /// the next time it would reach the head of its container.
    pub fn deactivate(&self) {
        self.0.active.set(false);
    }

    /// True unless [`Handle::deactivate`] has been called on this entry (on
    /// any clone of it).
    pub fn is_active(&self) -> bool {
        self.0.active.get()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle(Rc::clone(&self.0))
    }
}

/// First-in-first-out waiting container (breadth-first search order).
#[derive(Default)]
pub struct Fifo<T> {
    queue: VecDeque<Handle<T>>,
}

impl<T> Fifo<T> {
    /// An empty FIFO container.
    pub fn new() -> Fifo<T> {
        Fifo { queue: VecDeque::new() }
    }

    /// Pushes `value`, returning a handle that can later deactivate it.
    pub fn push(&mut self, value: T) -> Handle<T> {
        let handle = Handle::new(value);
        self.queue.push_back(handle.clone());
        handle
    }

    /// Pops the oldest still-active entry, discarding any inactive entries
    /// found ahead of it.
    pub fn pop(&mut self) -> Option<Handle<T>> {
        while let Some(front) = self.queue.pop_front() {
            if front.is_active() {
                return Some(front);
            }
        }
        None
    }

    /// True iff no active entry remains (skips and discards leading inactive
    /// entries as a side effect, same as `pop` would).
    pub fn is_empty(&mut self) -> bool {
        while let Some(front) = self.queue.front() {
            if front.is_active() {
                return false;
            }
            self.queue.pop_front();
        }
        true
    }
}

/// Last-in-first-out waiting container (depth-first search order).
#[derive(Default)]
pub struct Lifo<T> {
    stack: Vec<Handle<T>>,
}

impl<T> Lifo<T> {
    /// An empty LIFO container.
    pub fn new() -> Lifo<T> {
        Lifo { stack: Vec::new() }
    }

    /// Pushes `value`, returning a handle that can later deactivate it.
    pub fn push(&mut self, value: T) -> Handle<T> {
        let handle = Handle::new(value);
        self.stack.push(handle.clone());
        handle
    }

    /// Pops the most recently pushed still-active entry, discarding any
    /// inactive entries found above it.
    pub fn pop(&mut self) -> Option<Handle<T>> {
        while let Some(top) = self.stack.pop() {
            if top.is_active() {
                return Some(top);
            }
        }
        None
    }

    /// True iff no active entry remains.
    pub fn is_empty(&mut self) -> bool {
        while let Some(top) = self.stack.last() {
            if top.is_active() {
                return false;
            }
            self.stack.pop();
        }
        true
    }
}

/// Which waiting container an exploration algorithm should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Breadth-first: a [`Fifo`].
    Bfs,
    /// Depth-first: a [`Lifo`].
    Dfs,
}

/// A waiting container chosen at runtime by [`SearchOrder`], so the
/// exploration algorithms need not be generic over the container type.
pub enum Worklist<T> {
    /// Backed by a [`Fifo`].
    Bfs(Fifo<T>),
    /// Backed by a [`Lifo`].
    Dfs(Lifo<T>),
}

impl<T> Worklist<T> {
    /// Builds an empty worklist using the given search order.
    pub fn new(order: SearchOrder) -> Worklist<T> {
        match order {
            SearchOrder::Bfs => Worklist::Bfs(Fifo::new()),
            SearchOrder::Dfs => Worklist::Dfs(Lifo::new()),
        }
    }

    /// Pushes `value`, returning a handle that can later deactivate it.
    pub fn push(&mut self, value: T) -> Handle<T> {
        match self {
            Worklist::Bfs(f) => f.push(value),
            Worklist::Dfs(l) => l.push(value),
        }
    }

    /// Pops the next still-active entry per this worklist's order.
    pub fn pop(&mut self) -> Option<Handle<T>> {
        match self {
            Worklist::Bfs(f) => f.pop(),
            Worklist::Dfs(l) => l.pop(),
        }
    }
}
