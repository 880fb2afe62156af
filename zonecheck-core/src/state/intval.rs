//! Flattened integer-variable valuations (`intval`).

use smallvec::SmallVec;
use std::fmt;

/// A fixed-length array of integer-variable values, one slot per flat variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Intval {
    values: SmallVec<[i32; 8]>,
}

impl Intval {
    /// Builds an intval from its initial values, in declaration order.
    pub fn new(values: impl IntoIterator<Item = i32>) -> Intval {
        Intval {
            values: values.into_iter().collect(),
        }
    }

    /// Number of flat integer variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True iff there are no integer variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current value of variable `id`.
    pub fn get(&self, id: usize) -> i32 {
        self.values[id]
    }

    /// Raw slice access, e.g. to pass to the VM.
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Mutable raw slice access, e.g. for the VM to apply an update in place.
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.values
    }

    /// A copy of `self` with variable `id` set to `value`.
    pub fn with(&self, id: usize, value: i32) -> Intval {
        let mut values = self.values.clone();
        values[id] = value;
        Intval { values }
    }
}

impl fmt::Display for Intval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_a_single_variable() {
        let v = Intval::new([1, 2, 3]);
        let w = v.with(2, 9);
        assert_eq!(w.get(2), 9);
        assert_eq!(v.get(2), 3);
    }
}
