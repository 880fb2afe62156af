//! Boost-style hash combination, used to build a composed state's hash from its
//! sub-object hashes (§4.3 "The hash combines component hashes with Boost-style
//! mixing").

use std::hash::{Hash, Hasher};

/// Mixes `value`'s hash into `seed`, following `boost::hash_combine`.
pub fn combine<H: Hash>(seed: u64, value: &H) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    let h = hasher.finish();
    seed ^ (h
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_order_sensitive() {
        let a = combine(combine(0, &1u32), &2u32);
        let b = combine(combine(0, &2u32), &1u32);
        assert_ne!(a, b);
    }

    #[test]
    fn combine_is_deterministic() {
        let a = combine(combine(0, &1u32), &2u32);
        let b = combine(combine(0, &1u32), &2u32);
        assert_eq!(a, b);
    }
}
