//! Hash-cons table: content-addressed interning of pool-allocated objects.
//!
//! Implemented as chained buckets over an `fnv`-hashed key (the same hasher the
//! teacher reaches for when key distribution, not DoS-resistance, is what
//! matters) rather than hand-rolled open addressing: Rust's idiomatic answer to
//! "a hash table with full control over collision handling" is to bucket on a
//! precomputed hash and disambiguate by equality within the bucket, which is
//! what a hash-cons table needs (§4.4) without reimplementing probing by hand.

use super::pool_impl::PoolRef;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// A table that interns pool-allocated `T` values by structural equality,
/// returning a single canonical [`PoolRef`] per equivalence class.
pub struct HashCons<T> {
    buckets: FnvHashMap<u64, SmallVec<[PoolRef<T>; 1]>>,
    len: usize,
}

impl<T: Hash + Eq> Default for HashCons<T> {
    fn default() -> Self {
        HashCons::new()
    }
}

impl<T: Hash + Eq> HashCons<T> {
    /// An empty table.
    pub fn new() -> HashCons<T> {
        HashCons {
            buckets: FnvHashMap::default(),
            len: 0,
        }
    }

    /// A table pre-sized for `capacity` distinct entries.
    pub fn with_capacity(capacity: usize) -> HashCons<T> {
        HashCons {
            buckets: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
            len: 0,
        }
    }

    /// Number of distinct interned representatives.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True iff no object has been interned.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn hash_of(value: &T) -> u64 {
        use std::hash::Hasher;
        let mut hasher = fnv::FnvHasher::default();
        value.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the canonical representative structurally equal to `candidate`,
    /// inserting `candidate` as canonical if none exists yet.
    ///
    /// The caller should drop its own `candidate` handle after this call if a
    /// pre-existing representative was returned instead (mirroring §4.4: "the
    /// caller releases `candidate`"); since [`PoolRef`] frees on `Drop`, this
    /// happens automatically once the returned value replaces `candidate` in
    /// the caller's scope.
    pub fn find_or_insert(&mut self, candidate: PoolRef<T>) -> PoolRef<T> {
        let hash = Self::hash_of(&candidate);
        let bucket = self.buckets.entry(hash).or_default();
        for existing in bucket.iter() {
            if *existing == candidate {
                return existing.clone();
            }
        }
        bucket.push(candidate.clone());
        self.len += 1;
        candidate
    }

    /// Removes an interned entry, if present. Rare in practice (§4.4); the
    /// backing `SmallVec` tombstones itself by simply shrinking rather than
    /// keeping a separate tombstone marker, since there is no open-addressing
    /// probe sequence to preserve.
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = Self::hash_of(value);
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            if let Some(pos) = bucket.iter().position(|e| &**e == value) {
                bucket.remove(pos);
                self.len -= 1;
                return true;
            }
        }
        false
    }
}
