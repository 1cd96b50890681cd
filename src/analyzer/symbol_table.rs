use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One variable known to the program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Variable name
    pub name: String,
    /// Storage slot, assigned in first-occurrence order from 0
    pub slot: usize,
    /// Every line referencing the variable, in traversal order
    pub lines: Vec<usize>,
}

/// Name → slot mapping built by the resolver
///
/// Entries are kept in slot order; the index gives exact-match lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SymbolEntry>", into = "Vec<SymbolEntry>")]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Creates an empty table
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Record a reference, inserting the name with the next slot if new
    ///
    /// Returns the name's slot. Existing slots never change.
    pub(crate) fn record(&mut self, name: &str, line: usize) -> usize {
        if let Some(&slot) = self.index.get(name) {
            self.entries[slot].lines.push(line);
            return slot;
        }

        let slot = self.entries.len();
        self.entries.push(SymbolEntry {
            name: name.to_string(),
            slot,
            lines: vec![line],
        });
        self.index.insert(name.to_string(), slot);
        slot
    }

    /// Look up a variable by exact name
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Slot of a variable, if resolved
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of distinct variables (and value slots)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the program uses no variables
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter()
    }

    /// Machine-readable dump of the table
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::serialization)
    }
}

impl From<Vec<SymbolEntry>> for SymbolTable {
    fn from(entries: Vec<SymbolEntry>) -> Self {
        let mut table = SymbolTable::new();
        for entry in entries {
            let slot = table.entries.len();
            table.index.insert(entry.name.clone(), slot);
            table.entries.push(SymbolEntry { slot, ..entry });
        }
        table
    }
}

impl From<SymbolTable> for Vec<SymbolEntry> {
    fn from(table: SymbolTable) -> Self {
        table.entries
    }
}

/// `[Var=name][Mem=slot][Line=n]...`, one variable per line, slot order
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "[Var={}][Mem={}]", entry.name, entry.slot)?;
            for line in &entry.lines {
                write!(f, "[Line={}]", line)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_slots() {
        let mut table = SymbolTable::new();
        assert_eq!(table.record("b", 1), 0);
        assert_eq!(table.record("a", 1), 1);
        assert_eq!(table.record("b", 3), 0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("b").unwrap().lines, vec![1, 3]);
        assert_eq!(table.slot_of("a"), Some(1));
        assert_eq!(table.slot_of("A"), None);
    }

    #[test]
    fn test_display() {
        let mut table = SymbolTable::new();
        table.record("x", 1);
        table.record("y", 2);
        table.record("x", 2);
        assert_eq!(
            table.to_string(),
            "[Var=x][Mem=0][Line=1][Line=2]\n[Var=y][Mem=1][Line=2]\n"
        );
    }

    #[test]
    fn test_json_dump() {
        let mut table = SymbolTable::new();
        table.record("n", 4);
        let json = table.to_json().unwrap();
        assert!(json.contains("\"name\": \"n\""));
        assert!(json.contains("\"slot\": 0"));

        let back: SymbolTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slot_of("n"), Some(0));
        assert_eq!(back, table);
    }
}
