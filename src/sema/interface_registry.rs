// src/sema/interface_registry.rs

use rustc_hash::FxHashMap;

use crate::identity::{NameId, TypeDefId};
use crate::runtime::NativeFn;
use crate::sema::types::{Params, ReturnKind};

/// One required method of an interface.
#[derive(Debug, Clone)]
pub struct Signature {
    pub name: NameId,
    pub params: Params,
    pub return_kind: ReturnKind,
    /// Present exactly when the method is default-flagged.
    pub default: Option<NativeFn>,
}

impl Signature {
    pub fn is_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A field every implementer must declare. The annotation is classified
/// the same way as a method's return annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirement {
    pub name: NameId,
    pub kind: ReturnKind,
}

/// Complete interface definition. Immutable once registered.
#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub id: TypeDefId,
    pub name: NameId,
    /// Declaration order.
    pub fields: Vec<FieldRequirement>,
    /// Declaration order.
    pub signatures: Vec<Signature>,
}

impl InterfaceDef {
    pub fn signature(&self, name: NameId) -> Option<&Signature> {
        self.signatures.iter().find(|sig| sig.name == name)
    }

    pub fn field(&self, name: NameId) -> Option<&FieldRequirement> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Default-flagged signatures in declaration order.
    pub fn defaults(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter().filter(|sig| sig.is_default())
    }
}

/// Registry of all interface definitions
#[derive(Debug, Default, Clone)]
pub struct InterfaceRegistry {
    interfaces: FxHashMap<TypeDefId, InterfaceDef>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interface definition
    pub fn register(&mut self, def: InterfaceDef) {
        self.interfaces.insert(def.id, def);
    }

    /// Look up an interface by identity
    pub fn get(&self, id: TypeDefId) -> Option<&InterfaceDef> {
        self.interfaces.get(&id)
    }

    pub fn contains(&self, id: TypeDefId) -> bool {
        self.interfaces.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
