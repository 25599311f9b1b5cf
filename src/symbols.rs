//! Identifier bindings made by header assignments.

use std::collections::HashMap;

/// Maps identifiers to their most recently assigned value.
#[derive(Debug, Default)]
pub struct SymbolTable {
    values: HashMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn assign(&mut self, name: &str, value: i64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// All bindings, sorted by name.
    pub fn sorted(&self) -> Vec<(&str, i64)> {
        let mut bindings: Vec<(&str, i64)> = self
            .values
            .iter()
            .map(|(name, &value)| (name.as_str(), value))
            .collect();
        bindings.sort();
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_assignment_wins() {
        let mut symbols = SymbolTable::new();
        symbols.assign("x", 3);
        symbols.assign("x", -4);
        assert_eq!(symbols.get("x"), Some(-4));
    }

    #[test]
    fn test_missing_name() {
        let symbols = SymbolTable::new();
        assert_eq!(symbols.get("y"), None);
    }

    #[test]
    fn test_sorted() {
        let mut symbols = SymbolTable::new();
        symbols.assign("y", 2);
        symbols.assign("pad", 5);
        symbols.assign("x", 1);
        assert_eq!(symbols.sorted(), vec![("pad", 5), ("x", 1), ("y", 2)]);
    }
}
