use std::collections::HashMap;

/// Variable name to integer value, for one program run. Entries are created
/// by the first assignment and overwritten by later ones; nothing is ever
/// removed and there is no scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    values: HashMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }
    pub fn assign(&mut self, name: &str, value: i64) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
