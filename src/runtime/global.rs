// src/runtime/global.rs
//
// Process-wide registry. Declarations take the write lock once per type;
// every query shares the read lock.

use std::sync::{OnceLock, PoisonError, RwLock};

use crate::errors::DeclarationError;
use crate::identity::TypeDefId;
use crate::sema::decl::{ClassDecl, InterfaceDecl};
use crate::sema::{Conformance, Registry};

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(Registry::new()))
}

pub fn declare_interface(decl: InterfaceDecl) -> Result<TypeDefId, DeclarationError> {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    guard.declare_interface(decl)
}

pub fn declare_class(decl: ClassDecl) -> Result<TypeDefId, DeclarationError> {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    guard.declare_class(decl)
}

/// Run a read-only query against the global registry.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let guard = registry().read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

pub fn is_subclass(class: &str, target: &str) -> bool {
    with_registry(|registry| registry.is_subclass_by_name(class, target))
}

/// Conformance diagnostics by type name. `None` when either name is unknown.
pub fn conforms(class: &str, interface: &str) -> Option<Conformance> {
    with_registry(|registry| {
        let class = registry.type_by_name(class)?;
        let interface = registry.type_by_name(interface)?;
        Some(registry.conforms(class, interface))
    })
}
