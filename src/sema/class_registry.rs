// src/sema/class_registry.rs

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::identity::{NameId, TypeDefId};
use crate::runtime::{NativeFn, Value};
use crate::sema::types::{Decorator, Params, TypeAnnotation};

/// A method a class declares itself.
#[derive(Debug, Clone)]
pub struct MethodDef {
    pub name: NameId,
    pub params: Params,
    /// `None` when the method carries no return annotation.
    pub returns: Option<TypeAnnotation>,
    pub decorators: SmallVec<[Decorator; 2]>,
    /// Body-less methods return nil when called.
    pub body: Option<NativeFn>,
}

/// A data member a class declares itself.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: NameId,
    pub annotation: TypeAnnotation,
    /// Copied into every new instance unless the caller supplies a value.
    pub value: Option<Value>,
}

/// An interface default spliced onto a class that nominally inherits the
/// interface. Kept apart from the class's own methods so it never counts as
/// an explicit implementation of the interface that supplied it.
///
/// `params` and `returns` are the supplying signature's, with an
/// interface-typed return recorded as the interface's name.
#[derive(Debug, Clone)]
pub struct BoundDefault {
    pub interface: TypeDefId,
    pub params: Params,
    pub returns: TypeAnnotation,
    pub body: NativeFn,
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    pub id: TypeDefId,
    pub name: NameId,
    /// Direct bases in declaration order, classes and interfaces alike.
    pub bases: SmallVec<[TypeDefId; 2]>,
    /// Declaration order.
    pub fields: Vec<FieldDef>,
    /// Declaration order.
    pub methods: Vec<MethodDef>,
    method_index: FxHashMap<NameId, usize>,
    pub(crate) bound_defaults: FxHashMap<NameId, BoundDefault>,
}

impl ClassDef {
    pub fn new(id: TypeDefId, name: NameId, bases: SmallVec<[TypeDefId; 2]>) -> Self {
        Self {
            id,
            name,
            bases,
            fields: Vec::new(),
            methods: Vec::new(),
            method_index: FxHashMap::default(),
            bound_defaults: FxHashMap::default(),
        }
    }

    /// Add a method. Returns false if the name is already taken by a method
    /// or a field.
    pub fn add_method(&mut self, method: MethodDef) -> bool {
        if self.has_member(method.name) {
            return false;
        }
        self.method_index.insert(method.name, self.methods.len());
        self.methods.push(method);
        true
    }

    /// A method this class defines itself (not inherited, not a default).
    pub fn own_method(&self, name: NameId) -> Option<&MethodDef> {
        self.method_index.get(&name).map(|&idx| &self.methods[idx])
    }

    /// Add a field. Returns false if the name is already taken.
    pub fn add_field(&mut self, field: FieldDef) -> bool {
        if self.has_member(field.name) {
            return false;
        }
        self.fields.push(field);
        true
    }

    pub fn own_field(&self, name: NameId) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn defines(&self, name: NameId) -> bool {
        self.method_index.contains_key(&name)
    }

    /// A method or field of this name is declared on the class itself.
    pub fn has_member(&self, name: NameId) -> bool {
        self.defines(name) || self.own_field(name).is_some()
    }

    pub fn bound_default(&self, name: NameId) -> Option<&BoundDefault> {
        self.bound_defaults.get(&name)
    }

    /// Names of bound defaults, sorted for stable output.
    pub fn bound_default_names(&self) -> Vec<NameId> {
        let mut names: Vec<NameId> = self.bound_defaults.keys().copied().collect();
        names.sort();
        names
    }
}

/// Registry of all class definitions
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    classes: FxHashMap<TypeDefId, ClassDef>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: ClassDef) {
        self.classes.insert(def.id, def);
    }

    pub fn get(&self, id: TypeDefId) -> Option<&ClassDef> {
        self.classes.get(&id)
    }

    pub fn contains(&self, id: TypeDefId) -> bool {
        self.classes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
