//! Born/survive neighbour-count sets of a life-like rule.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

/// The largest neighbour count in a Moore neighbourhood.
pub const MAX_NEIGHBOURS: u8 = 8;

/// Neighbour counts at which a dead cell is born and a live cell survives.
///
/// Both sets iterate in ascending order. [`Rules::default`] is Conway's `B3/S23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub born: BTreeSet<u8>,
    pub survive: BTreeSet<u8>,
}

impl Rules {
    pub fn new(born: impl IntoIterator<Item = u8>, survive: impl IntoIterator<Item = u8>) -> Self {
        Self {
            born: born.into_iter().collect(),
            survive: survive.into_iter().collect(),
        }
    }

    /// Rules with no counts in either set.
    pub fn empty() -> Self {
        Self {
            born: BTreeSet::new(),
            survive: BTreeSet::new(),
        }
    }

    /// Whether both sets have at least one count.
    pub fn is_complete(&self) -> bool {
        !self.born.is_empty() && !self.survive.is_empty()
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new([3], [2, 3])
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.born.iter().join(""),
            self.survive.iter().join("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_conway() {
        let rules = Rules::default();
        assert_eq!(rules.born, BTreeSet::from([3]));
        assert_eq!(rules.survive, BTreeSet::from([2, 3]));
        assert_eq!(rules.to_string(), "B3/S23");
    }

    #[test]
    fn test_display_sorts_digits() {
        assert_eq!(Rules::new([6, 3], [3, 2]).to_string(), "B36/S23");
    }

    #[test]
    fn test_display_empty_set() {
        assert_eq!(Rules::new([3], []).to_string(), "B3/S");
    }

    #[test]
    fn test_is_complete() {
        assert!(Rules::default().is_complete());
        assert!(!Rules::new([3], []).is_complete());
        assert!(!Rules::empty().is_complete());
    }
}
