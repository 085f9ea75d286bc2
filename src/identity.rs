// src/identity.rs
//
// Shared name interning and type identities.

use rustc_hash::FxHashMap;

/// Interned name of a type, method or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(u32);

impl NameId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Identity of a declared class or interface. Dense index into the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDefId(u32);

impl TypeDefId {
    pub fn new(index: u32) -> Self {
        TypeDefId(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names that exist before any declaration.
#[derive(Debug, Clone, Copy)]
pub struct Primitives {
    pub int: NameId,
    pub float: NameId,
    pub bool: NameId,
    pub str: NameId,
    pub nil: NameId,
}

#[derive(Debug, Clone)]
pub struct NameTable {
    names: Vec<String>,
    lookup: FxHashMap<String, NameId>,
    pub primitives: Primitives,
}

impl NameTable {
    pub fn new() -> Self {
        let mut names = Vec::new();
        let mut lookup = FxHashMap::default();
        let mut prim = |name: &str| {
            let id = NameId(names.len() as u32);
            names.push(name.to_string());
            lookup.insert(name.to_string(), id);
            id
        };
        let primitives = Primitives {
            int: prim("int"),
            float: prim("float"),
            bool: prim("bool"),
            str: prim("str"),
            nil: prim("nil"),
        };
        Self {
            names,
            lookup,
            primitives,
        }
    }

    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(id) = self.lookup.get(name) {
            return *id;
        }
        let id = NameId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Look up a name without interning it.
    pub fn name_id(&self, name: &str) -> Option<NameId> {
        self.lookup.get(name).copied()
    }

    pub fn resolve(&self, id: NameId) -> &str {
        &self.names[id.0 as usize]
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}
