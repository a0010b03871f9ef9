//! Qubit lane identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based index of a qubit lane within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The lane index as a `usize`, for addressing per-lane tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(17)), "q17");
    }

    #[test]
    fn test_qubit_ordering() {
        assert!(QubitId(1) < QubitId(2));
        assert_eq!(QubitId::from(3u32).index(), 3);
    }
}
