// src/runtime/dispatch.rs
//
// Instantiation and method calls against the registry.
//
// Resolution order for a class: its own methods, then its bound defaults,
// then each base class depth-first in declaration order.

use std::sync::Arc;

use crate::errors::RuntimeError;
use crate::identity::{NameId, TypeDefId};
use crate::runtime::{Instance, NativeFn, Value};
use crate::sema::Registry;
use crate::sema::types::TypeDefKind;

/// Where a resolved method came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOrigin {
    /// Declared by this class.
    Own(TypeDefId),
    /// An interface default bound onto `bound_to`.
    Default {
        interface: TypeDefId,
        bound_to: TypeDefId,
    },
}

#[derive(Debug, Clone)]
pub struct ResolvedMethod<'a> {
    pub origin: MethodOrigin,
    pub arity: usize,
    /// `None` for a body-less declared method, which returns nil.
    pub body: Option<&'a NativeFn>,
}

impl Registry {
    /// Create an instance of a class. Interfaces cannot be instantiated.
    pub fn instantiate(&self, class: TypeDefId) -> Result<Arc<Instance>, RuntimeError> {
        self.instantiate_with(class, Vec::new())
    }

    /// Create an instance whose declared fields start at their declared
    /// values, with `fields` applied on top.
    pub fn instantiate_with(
        &self,
        class: TypeDefId,
        fields: Vec<(String, Value)>,
    ) -> Result<Arc<Instance>, RuntimeError> {
        match self.kind(class) {
            Some(TypeDefKind::Class) => {
                let mut instance = Instance::new(class);
                if let Some(view) = self.candidate(class) {
                    for field in view.fields() {
                        if let Some(value) = &field.value {
                            instance =
                                instance.with_field(self.names.resolve(field.name), value.clone());
                        }
                    }
                }
                let instance = fields
                    .into_iter()
                    .fold(instance, |inst, (name, value)| inst.with_field(name, value));
                Ok(Arc::new(instance))
            }
            Some(TypeDefKind::Interface) => Err(RuntimeError::InstantiateInterface {
                name: self.type_name(class).to_string(),
            }),
            None => Err(RuntimeError::UnknownType {
                name: format!("#{}", class.index()),
            }),
        }
    }

    /// Resolve the method a call on an instance of `class` would run.
    pub fn resolve_method(&self, class: TypeDefId, method: &str) -> Option<ResolvedMethod<'_>> {
        let name = self.names.name_id(method)?;
        self.resolve_method_id(class, name)
    }

    pub(crate) fn resolve_method_id(
        &self,
        class: TypeDefId,
        name: NameId,
    ) -> Option<ResolvedMethod<'_>> {
        let def = self.classes.get(class)?;
        if let Some(method) = def.own_method(name) {
            return Some(ResolvedMethod {
                origin: MethodOrigin::Own(class),
                arity: method.params.len(),
                body: method.body.as_ref(),
            });
        }
        if let Some(bound) = def.bound_default(name) {
            return Some(ResolvedMethod {
                origin: MethodOrigin::Default {
                    interface: bound.interface,
                    bound_to: class,
                },
                arity: bound.params.len(),
                body: Some(&bound.body),
            });
        }
        def.bases
            .iter()
            .find_map(|&base| self.resolve_method_id(base, name))
    }

    /// Call a method on an instance.
    pub fn call(
        &self,
        receiver: &Arc<Instance>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let Some(resolved) = self.resolve_method(receiver.class(), method) else {
            return Err(RuntimeError::NoSuchMethod {
                type_name: self.type_name(receiver.class()).to_string(),
                method: method.to_string(),
            });
        };
        if resolved.arity != args.len() {
            return Err(RuntimeError::WrongArgumentCount {
                method: method.to_string(),
                expected: resolved.arity,
                found: args.len(),
            });
        }
        tracing::trace!(method, origin = ?resolved.origin, "call");
        match resolved.body {
            Some(body) => body.call(self, receiver, args),
            None => Ok(Value::Nil),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sema::decl::{Annotation, ClassDecl, FieldDecl, InterfaceDecl, MethodDecl};

    fn container_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .declare_interface(
                InterfaceDecl::new("Container")
                    .method(
                        MethodDecl::new("size")
                            .returns(Annotation::named("int"))
                            .default_body(NativeFn::constant(Value::Int(0))),
                    )
                    .method(
                        MethodDecl::new("is_empty")
                            .returns(Annotation::named("bool"))
                            .default_body(NativeFn::new(|registry, this, _| {
                                let size = registry.call(this, "size", &[])?;
                                Ok(Value::Bool(size == Value::Int(0)))
                            })),
                    ),
            )
            .unwrap();
        registry
            .declare_class(ClassDecl::new("Box").base("Container"))
            .unwrap();
        registry
            .declare_class(
                ClassDecl::new("Bag").base("Container").method(
                    MethodDecl::new("size")
                        .returns(Annotation::named("int"))
                        .body(NativeFn::new(|_, this, _| {
                            Ok(this.field("count").cloned().unwrap_or(Value::Int(0)))
                        })),
                ),
            )
            .unwrap();
        registry
    }

    #[test]
    fn default_runs_for_nominal_subclass() {
        let registry = container_registry();
        let boxed = registry
            .instantiate(registry.type_by_name("Box").unwrap())
            .unwrap();
        assert_eq!(registry.call(&boxed, "size", &[]), Ok(Value::Int(0)));
        assert_eq!(registry.call(&boxed, "is_empty", &[]), Ok(Value::Bool(true)));
    }

    #[test]
    fn override_runs_instead_of_default() {
        let registry = container_registry();
        let bag_id = registry.type_by_name("Bag").unwrap();
        let bag = registry
            .instantiate_with(bag_id, vec![("count".to_string(), Value::Int(3))])
            .unwrap();
        assert_eq!(registry.call(&bag, "size", &[]), Ok(Value::Int(3)));
        // The default body dispatches back to the override.
        assert_eq!(registry.call(&bag, "is_empty", &[]), Ok(Value::Bool(false)));
        assert_eq!(
            registry.resolve_method(bag_id, "size").unwrap().origin,
            MethodOrigin::Own(bag_id)
        );
    }

    #[test]
    fn interfaces_cannot_be_instantiated() {
        let registry = container_registry();
        let container = registry.type_by_name("Container").unwrap();
        assert_eq!(
            registry.instantiate(container).unwrap_err(),
            RuntimeError::InstantiateInterface {
                name: "Container".to_string()
            }
        );
    }

    #[test]
    fn call_errors() {
        let registry = container_registry();
        let boxed = registry
            .instantiate(registry.type_by_name("Box").unwrap())
            .unwrap();
        assert!(matches!(
            registry.call(&boxed, "open", &[]),
            Err(RuntimeError::NoSuchMethod { .. })
        ));
        assert_eq!(
            registry.call(&boxed, "size", &[Value::Int(1)]),
            Err(RuntimeError::WrongArgumentCount {
                method: "size".to_string(),
                expected: 0,
                found: 1,
            })
        );
    }

    #[test]
    fn defaults_are_inherited_through_class_bases() {
        let mut registry = container_registry();
        let crate_id = registry
            .declare_class(ClassDecl::new("Crate").base("Box"))
            .unwrap();
        let box_id = registry.type_by_name("Box").unwrap();
        let resolved = registry.resolve_method(crate_id, "size").unwrap();
        assert!(matches!(
            resolved.origin,
            MethodOrigin::Default { bound_to, .. } if bound_to == box_id
        ));
    }

    #[test]
    fn body_less_method_returns_nil() {
        let mut registry = Registry::new();
        let id = registry
            .declare_class(ClassDecl::new("Stub").method(MethodDecl::new("noop")))
            .unwrap();
        let stub = registry.instantiate(id).unwrap();
        assert_eq!(registry.call(&stub, "noop", &[]), Ok(Value::Nil));
    }

    #[test]
    fn declared_field_values_seed_instances() {
        let mut registry = Registry::new();
        registry
            .declare_class(
                ClassDecl::new("Widget")
                    .field(FieldDecl::new("label", Annotation::named("str")).value(Value::str("?")))
                    .field(FieldDecl::new("width", Annotation::named("int")).value(Value::Int(1))),
            )
            .unwrap();
        let id = registry
            .declare_class(
                ClassDecl::new("Button")
                    .base("Widget")
                    .field(FieldDecl::new("label", Annotation::named("str")).value(Value::str("ok")))
                    .field(FieldDecl::new("pressed", Annotation::named("bool"))),
            )
            .unwrap();

        let button = registry
            .instantiate_with(id, vec![("width".to_string(), Value::Int(4))])
            .unwrap();
        assert_eq!(button.field("label"), Some(&Value::str("ok")));
        assert_eq!(button.field("width"), Some(&Value::Int(4)));
        assert!(button.field("pressed").is_none());
    }
}
