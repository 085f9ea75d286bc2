// src/sema/registry.rs
//
// Process-lifetime table of every declared class and interface. Populated
// only by the declaration passes; all queries take `&self`.

use rustc_hash::FxHashMap;

use crate::identity::{NameId, NameTable, TypeDefId};
use crate::sema::class_registry::{ClassDef, ClassRegistry, FieldDef, MethodDef};
use crate::sema::conformance::ConformanceCache;
use crate::sema::decl::{Annotation, ParamDecl};
use crate::sema::interface_registry::{InterfaceDef, InterfaceRegistry};
use crate::sema::types::{Param, Params, TypeAnnotation, TypeDefKind};

#[derive(Debug, Clone, Copy)]
pub struct TypeDef {
    pub id: TypeDefId,
    pub name: NameId,
    pub kind: TypeDefKind,
}

#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) names: NameTable,
    type_defs: Vec<TypeDef>,
    type_by_name: FxHashMap<NameId, TypeDefId>,
    pub(crate) interfaces: InterfaceRegistry,
    pub(crate) classes: ClassRegistry,
    pub(crate) cache: ConformanceCache,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn type_def(&self, id: TypeDefId) -> Option<&TypeDef> {
        self.type_defs.get(id.index() as usize)
    }

    pub fn kind(&self, id: TypeDefId) -> Option<TypeDefKind> {
        self.type_def(id).map(|def| def.kind)
    }

    /// Display name of a declared type, or `<unknown>`.
    pub fn type_name(&self, id: TypeDefId) -> &str {
        self.type_def(id)
            .map(|def| self.names.resolve(def.name))
            .unwrap_or("<unknown>")
    }

    pub fn type_by_name(&self, name: &str) -> Option<TypeDefId> {
        let name_id = self.names.name_id(name)?;
        self.type_by_name_id(name_id)
    }

    pub fn type_by_name_id(&self, name: NameId) -> Option<TypeDefId> {
        self.type_by_name.get(&name).copied()
    }

    pub fn interface(&self, id: TypeDefId) -> Option<&InterfaceDef> {
        self.interfaces.get(id)
    }

    pub fn class(&self, id: TypeDefId) -> Option<&ClassDef> {
        self.classes.get(id)
    }

    /// Every declared type of the given kind, in declaration order.
    pub fn type_ids(&self, kind: TypeDefKind) -> impl Iterator<Item = TypeDefId> + '_ {
        self.type_defs
            .iter()
            .filter(move |def| def.kind == kind)
            .map(|def| def.id)
    }

    /// Find a method the class declares itself or inherits from a class base.
    ///
    /// Interface bases are skipped: their stubs are not implementations and
    /// their defaults live in the bound-default table. Bases are searched
    /// depth-first in declaration order.
    pub fn find_declared_method(
        &self,
        class: TypeDefId,
        name: NameId,
    ) -> Option<(TypeDefId, &MethodDef)> {
        let def = self.classes.get(class)?;
        if let Some(method) = def.own_method(name) {
            return Some((class, method));
        }
        def.bases
            .iter()
            .find_map(|&base| self.find_declared_method(base, name))
    }

    /// Find a field the class declares itself or inherits from a class base.
    pub fn find_field(&self, class: TypeDefId, name: NameId) -> Option<(TypeDefId, &FieldDef)> {
        let def = self.classes.get(class)?;
        if let Some(field) = def.own_field(name) {
            return Some((class, field));
        }
        def.bases
            .iter()
            .find_map(|&base| self.find_field(base, name))
    }

    pub(crate) fn is_declared(&self, name: NameId) -> bool {
        self.type_by_name.contains_key(&name)
    }

    /// Allocate an identity for a fully validated declaration.
    pub(crate) fn allocate(&mut self, name: NameId, kind: TypeDefKind) -> TypeDefId {
        let id = TypeDefId::new(self.type_defs.len() as u32);
        self.type_defs.push(TypeDef { id, name, kind });
        self.type_by_name.insert(name, id);
        // Names that were unresolved before may now resolve differently.
        self.cache.clear();
        id
    }

    pub(crate) fn intern_annotation(&mut self, annotation: &Annotation) -> TypeAnnotation {
        match annotation {
            Annotation::SelfType => TypeAnnotation::SelfType,
            Annotation::Named(name) => TypeAnnotation::Named(self.names.intern(name)),
        }
    }

    pub(crate) fn intern_params(&mut self, params: &[ParamDecl]) -> Params {
        params
            .iter()
            .map(|p| Param {
                name: self.names.intern(&p.name),
                annotation: p.annotation.as_ref().map(|a| self.intern_annotation(a)),
            })
            .collect()
    }
}
