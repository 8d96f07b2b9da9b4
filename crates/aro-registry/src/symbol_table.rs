//! Per-feature-set symbol tables.
//!
//! A table is assembled by a [`SymbolTableBuilder`] during the analyzer's
//! single pass and then frozen into an immutable [`SymbolTable`]. Both keep
//! definition order, so diagnostics derived from iteration are deterministic.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{DataType, Symbol, Visibility};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Mutable table used while a feature set is being analyzed.
#[derive(Debug, Clone, Default)]
pub struct SymbolTableBuilder {
    symbols: FxIndexMap<String, Symbol>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a symbol. A redefinition replaces the symbol but keeps its
    /// original position.
    pub fn define(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(symbol.name.clone(), symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Symbols defined so far, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Type of a defined symbol, `Any` when unknown.
    pub fn type_of(&self, name: &str) -> DataType {
        self.symbols
            .get(name)
            .map_or(DataType::Any, |s| s.data_type.clone())
    }

    /// Marks an existing symbol as published. Returns `false` if it is not defined.
    pub fn promote_to_published(&mut self, name: &str) -> bool {
        match self.symbols.get_mut(name) {
            Some(symbol) => {
                symbol.visibility = Visibility::Published;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Freezes the table.
    pub fn build(self) -> SymbolTable {
        SymbolTable {
            symbols: self.symbols,
        }
    }
}

/// Immutable symbol table of an analyzed feature set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: FxIndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Symbols in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// Published symbols, including aliases.
    pub fn published(&self) -> impl Iterator<Item = &Symbol> {
        self.iter()
            .filter(|s| s.visibility == Visibility::Published)
    }

    /// Published aliases only. These carry the external names.
    pub fn aliases(&self) -> impl Iterator<Item = &Symbol> {
        self.iter().filter(|s| s.is_alias())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = indexmap::map::Values<'a, String, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Provenance;
    use aro_core::Span;

    fn computed(name: &str) -> Symbol {
        Symbol::internal(name, Provenance::Computed, DataType::Any, Span::default())
    }

    #[test]
    fn keeps_definition_order() {
        let mut builder = SymbolTableBuilder::new();
        builder.define(computed("b"));
        builder.define(computed("a"));
        builder.define(computed("c"));
        let table = builder.build();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn builder_iterates_in_definition_order() {
        let mut builder = SymbolTableBuilder::new();
        builder.define(computed("total"));
        builder.define(computed("count"));
        let names: Vec<_> = builder.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["total", "count"]);
    }

    #[test]
    fn redefinition_keeps_position() {
        let mut builder = SymbolTableBuilder::new();
        builder.define(computed("x"));
        builder.define(computed("y"));
        let previous = builder.define(Symbol::internal(
            "x",
            Provenance::ExtractedFrom("request".into()),
            DataType::String,
            Span::default(),
        ));
        assert!(previous.is_some());
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.type_of("x"), DataType::String);

        let table = builder.build();
        assert_eq!(table.names().next(), Some("x"));
    }

    #[test]
    fn promote_and_alias() {
        let mut builder = SymbolTableBuilder::new();
        builder.define(computed("total"));
        assert!(builder.promote_to_published("total"));
        assert!(!builder.promote_to_published("missing"));
        builder.define(Symbol::alias("order-total", "total", DataType::Number, Span::default()));

        let table = builder.build();
        assert_eq!(table.published().count(), 2);
        let aliases: Vec<_> = table.aliases().map(|s| s.name.as_str()).collect();
        assert_eq!(aliases, vec!["order-total"]);
        assert_eq!(table.get("total").map(|s| s.visibility), Some(Visibility::Published));
    }
}
