//! Symbol registry: the single source of truth for every documented entity.
//!
//! Symbols live in an arena and are addressed by [`SymbolId`]. Doxygen
//! identifiers map onto arena slots; a typedef folded into the struct it
//! names maps onto the struct's slot. Page names are tracked separately so
//! two symbols can never write the same file.

use std::collections::HashMap;

use crate::error::Error;
use crate::model::{Harvest, Symbol, SymbolId, SymbolKind};

/// Project metadata read from `doxyfile.xml`.
#[derive(Debug, Default, Clone)]
pub struct Project {
    pub name: Option<String>,
    pub brief: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Default)]
pub struct Registry {
    symbols: Vec<Symbol>,
    by_id: HashMap<String, SymbolId>,
    by_page: HashMap<String, SymbolId>,
    pages: Vec<SymbolId>,
    group_ordering: Vec<String>,
    pub project: Project,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `symbol`, returning its handle.
    ///
    /// Registering an identifier twice is a no-op that returns the existing
    /// handle. A symbol whose page name is already taken is an error.
    pub fn register(&mut self, symbol: Symbol) -> Result<SymbolId, Error> {
        if let Some(&existing) = self.by_id.get(&symbol.id) {
            return Ok(existing);
        }

        if let Some(page) = &symbol.page_name {
            if let Some(&other) = self.by_page.get(page) {
                return Err(Error::PageCollision {
                    page: page.clone(),
                    first: symbol.kind_name(),
                    second: self.get(other).kind_name(),
                });
            }
        }

        let handle = SymbolId(self.symbols.len());
        self.by_id.insert(symbol.id.clone(), handle);
        if let Some(page) = &symbol.page_name {
            self.by_page.insert(page.clone(), handle);
            self.pages.push(handle);
        }
        self.symbols.push(symbol);
        Ok(handle)
    }

    /// Make `id` resolve to `target` and record it as one of the target's
    /// aliases.
    pub fn alias(&mut self, id: &str, target: SymbolId) {
        if self.by_id.contains_key(id) {
            return;
        }
        self.by_id.insert(id.to_string(), target);
        match &mut self.symbols[target.0].kind {
            SymbolKind::Composite(c) => c.aliases.push(id.to_string()),
            SymbolKind::Enum(e) => e.aliases.push(id.to_string()),
            _ => {}
        }
    }

    /// Handles are only minted by this registry, so lookup cannot fail.
    pub fn get(&self, handle: SymbolId) -> &Symbol {
        &self.symbols[handle.0]
    }

    pub fn get_mut(&mut self, handle: SymbolId) -> &mut Symbol {
        &mut self.symbols[handle.0]
    }

    pub fn lookup(&self, id: &str) -> Option<SymbolId> {
        self.by_id.get(id).copied()
    }

    /// Like [`Registry::lookup`], for identifiers an earlier pass must have
    /// registered.
    pub fn resolve(&self, id: &str) -> Result<SymbolId, Error> {
        self.lookup(id)
            .ok_or_else(|| Error::UnresolvedSymbol { id: id.to_string() })
    }

    pub fn by_page(&self, page: &str) -> Option<SymbolId> {
        self.by_page.get(page).copied()
    }

    /// Symbols that own a page, in registration order.
    pub fn pages(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.pages.iter().copied()
    }

    /// Record a group in `index.xml` order.
    pub fn declare_group(&mut self, id: &str) {
        if !self.group_ordering.iter().any(|g| g == id) {
            self.group_ordering.push(id.to_string());
        }
    }

    /// Position of a group in `index.xml`; unknown groups sort last.
    pub fn group_position(&self, id: &str) -> usize {
        self.group_ordering
            .iter()
            .position(|g| g == id)
            .unwrap_or(usize::MAX)
    }

    /// Note that `owner`'s documentation points at `target`.
    pub fn add_referenced(&mut self, owner: SymbolId, target: SymbolId) {
        if owner == target {
            return;
        }
        let referenced = &mut self.symbols[owner.0].referenced;
        if !referenced.contains(&target) {
            referenced.push(target);
        }
    }

    /// Fold side-channel content collected by the builder into `owner`.
    pub fn absorb(&mut self, owner: SymbolId, harvest: Harvest) {
        for target in harvest.referenced {
            self.add_referenced(owner, target);
        }

        let symbol = &mut self.symbols[owner.0];
        symbol.authors.extend(harvest.authors);
        symbol.bugs.extend(harvest.bugs);
        symbol.deprecated.extend(harvest.deprecated);
        for example in harvest.examples {
            if !symbol.examples.contains(&example) {
                symbol.examples.push(example);
            }
        }

        match &mut symbol.kind {
            SymbolKind::Function(f) => {
                if harvest.parameters.is_some() {
                    f.parameter_docs = harvest.parameters;
                }
                if harvest.returns.is_some() {
                    f.return_docs = harvest.returns;
                }
            }
            SymbolKind::Define(d) => {
                if harvest.parameters.is_some() {
                    d.parameter_docs = harvest.parameters;
                }
                if harvest.returns.is_some() {
                    d.return_docs = harvest.returns;
                }
            }
            SymbolKind::Typedef(t) => {
                for name in harvest.param_names {
                    if !t.documented_params.contains(&name) {
                        t.documented_params.push(name);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Composite, Function};
    use crate::roff::Document;

    fn function(id: &str, name: &str) -> Symbol {
        Symbol::new(id, name, SymbolKind::Function(Function::default())).with_page()
    }

    fn structure(id: &str, name: &str) -> Symbol {
        Symbol::new(
            id,
            name,
            SymbolKind::Composite(Composite {
                is_struct: true,
                ..Composite::default()
            }),
        )
        .with_page()
    }

    #[test]
    fn reregistering_returns_same_handle() {
        let mut reg = Registry::new();
        let a = reg.register(function("f1", "open")).unwrap();
        let b = reg.register(function("f1", "open")).unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.pages().count(), 1);
        assert_eq!(reg.by_page("open"), Some(a));
    }

    #[test]
    fn page_collision_names_both_kinds() {
        let mut reg = Registry::new();
        reg.register(structure("s1", "widget")).unwrap();
        let err = reg.register(function("f1", "Widget")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot have function and struct man pages both named 'widget'"
        );
    }

    #[test]
    fn alias_resolves_to_target() {
        let mut reg = Registry::new();
        let target = reg.register(structure("s1", "widget")).unwrap();
        reg.alias("t1", target);
        assert_eq!(reg.lookup("t1"), Some(target));
        assert_eq!(reg.pages().count(), 1);
        match &reg.get(target).kind {
            SymbolKind::Composite(c) => assert_eq!(c.aliases, vec!["t1".to_string()]),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn resolve_reports_missing_identifier() {
        let reg = Registry::new();
        assert!(matches!(
            reg.resolve("nope"),
            Err(Error::UnresolvedSymbol { .. })
        ));
    }

    #[test]
    fn absorb_merges_side_channels() {
        let mut reg = Registry::new();
        let f = reg.register(function("f1", "open")).unwrap();
        let s = reg.register(structure("s1", "widget")).unwrap();

        let mut returns = Document::new();
        returns.push_text("zero on success");
        let harvest = Harvest {
            referenced: vec![s, f, s],
            returns: Some(returns.clone()),
            ..Harvest::default()
        };
        reg.absorb(f, harvest);

        let sym = reg.get(f);
        assert_eq!(sym.referenced, vec![s]);
        match &sym.kind {
            SymbolKind::Function(func) => assert_eq!(func.return_docs, Some(returns)),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn groups_keep_index_order() {
        let mut reg = Registry::new();
        reg.declare_group("group__b");
        reg.declare_group("group__a");
        reg.declare_group("group__b");
        assert_eq!(reg.group_position("group__b"), 0);
        assert_eq!(reg.group_position("group__a"), 1);
        assert_eq!(reg.group_position("group__z"), usize::MAX);
    }
}
