// src/sema/default_binder.rs
//
// Splices interface defaults onto classes that list the interface as a base.
// Runs once per class, from `declare_class`, and never for classes that only
// conform structurally.

use crate::sema::Registry;
use crate::sema::class_registry::{BoundDefault, ClassDef};
use crate::sema::interface_registry::InterfaceDef;
use crate::sema::types::{ReturnKind, TypeAnnotation};

impl Registry {
    /// Bind every default of every interface base that the class does not
    /// provide itself.
    ///
    /// A member the class declares, or inherits from a class base, always
    /// wins over a default. So does a default reachable through a class base
    /// listed before the interface, which resolves first. When two interface
    /// bases default the same name, the later base wins.
    pub(crate) fn bind_defaults(&self, class: &mut ClassDef) {
        for (position, &base) in class.bases.iter().enumerate() {
            let Some(interface) = self.interfaces.get(base) else {
                continue;
            };
            for signature in interface.defaults() {
                let method = self.names.resolve(signature.name);
                if class.has_member(signature.name) {
                    tracing::trace!(%method, "default overridden by class");
                    continue;
                }
                let inherited = class.bases.iter().any(|&b| {
                    self.find_declared_method(b, signature.name).is_some()
                        || self.find_field(b, signature.name).is_some()
                });
                if inherited {
                    tracing::trace!(%method, "default overridden by class base");
                    continue;
                }
                let shadowed = class.bases[..position]
                    .iter()
                    .any(|&b| self.resolve_method_id(b, signature.name).is_some());
                if shadowed {
                    tracing::trace!(%method, "default shadowed by earlier class base");
                    continue;
                }
                let Some(body) = signature.default.clone() else {
                    continue;
                };
                let previous = class.bound_defaults.insert(
                    signature.name,
                    BoundDefault {
                        interface: base,
                        params: signature.params.clone(),
                        returns: bound_return(interface, signature.return_kind),
                        body,
                    },
                );
                tracing::debug!(
                    %method,
                    interface = %self.type_name(base),
                    replaced = previous.is_some(),
                    "bound default"
                );
            }
        }
    }
}

/// The annotation a bound default presents to other interfaces.
fn bound_return(interface: &InterfaceDef, kind: ReturnKind) -> TypeAnnotation {
    match kind {
        ReturnKind::SelfType => TypeAnnotation::SelfType,
        ReturnKind::InterfaceType(_) => TypeAnnotation::Named(interface.name),
        ReturnKind::Concrete(name) => TypeAnnotation::Named(name),
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{NativeFn, Value};
    use crate::sema::Registry;
    use crate::sema::decl::{Annotation, ClassDecl, FieldDecl, InterfaceDecl, MethodDecl};
    use crate::sema::types::TypeAnnotation;

    fn sized(registry: &mut Registry, name: &str, size: i64) {
        registry
            .declare_interface(
                InterfaceDecl::new(name).method(
                    MethodDecl::new("size")
                        .returns(Annotation::named("int"))
                        .default_body(NativeFn::constant(Value::Int(size))),
                ),
            )
            .unwrap();
    }

    #[test]
    fn binds_unimplemented_default() {
        let mut registry = Registry::new();
        sized(&mut registry, "Container", 0);
        let id = registry
            .declare_class(ClassDecl::new("Box").base("Container"))
            .unwrap();

        let size = registry.names().name_id("size").unwrap();
        let class = registry.class(id).unwrap();
        assert!(class.bound_default(size).is_some());
        assert!(!class.defines(size));
    }

    #[test]
    fn class_override_is_never_replaced() {
        let mut registry = Registry::new();
        sized(&mut registry, "Container", 0);
        let id = registry
            .declare_class(
                ClassDecl::new("Crate")
                    .base("Container")
                    .method(MethodDecl::new("size").returns(Annotation::named("int"))),
            )
            .unwrap();
        let size = registry.names().name_id("size").unwrap();
        assert!(registry.class(id).unwrap().bound_default(size).is_none());
    }

    #[test]
    fn method_inherited_from_class_base_wins() {
        let mut registry = Registry::new();
        sized(&mut registry, "Container", 0);
        registry
            .declare_class(
                ClassDecl::new("Storage")
                    .method(MethodDecl::new("size").returns(Annotation::named("int"))),
            )
            .unwrap();
        let id = registry
            .declare_class(ClassDecl::new("Shelf").base("Container").base("Storage"))
            .unwrap();
        let size = registry.names().name_id("size").unwrap();
        assert!(registry.class(id).unwrap().bound_default(size).is_none());
    }

    #[test]
    fn later_interface_base_wins() {
        let mut registry = Registry::new();
        sized(&mut registry, "Small", 1);
        sized(&mut registry, "Large", 100);
        let large = registry.type_by_name("Large").unwrap();
        let id = registry
            .declare_class(ClassDecl::new("Bin").base("Small").base("Large"))
            .unwrap();
        let size = registry.names().name_id("size").unwrap();
        let bound = registry.class(id).unwrap().bound_default(size).unwrap();
        assert_eq!(bound.interface, large);
    }

    #[test]
    fn default_inherited_through_earlier_class_base_wins() {
        let mut registry = Registry::new();
        sized(&mut registry, "Small", 1);
        sized(&mut registry, "Large", 100);
        registry
            .declare_class(ClassDecl::new("Base").base("Small"))
            .unwrap();
        let sub = registry
            .declare_class(ClassDecl::new("Sub").base("Base").base("Large"))
            .unwrap();
        let flipped = registry
            .declare_class(ClassDecl::new("Flipped").base("Large").base("Base"))
            .unwrap();

        let size = registry.names().name_id("size").unwrap();
        assert!(registry.class(sub).unwrap().bound_default(size).is_none());

        let sub = registry.instantiate(sub).unwrap();
        assert_eq!(registry.call(&sub, "size", &[]), Ok(Value::Int(1)));
        let flipped = registry.instantiate(flipped).unwrap();
        assert_eq!(registry.call(&flipped, "size", &[]), Ok(Value::Int(100)));
    }

    #[test]
    fn field_blocks_default() {
        let mut registry = Registry::new();
        sized(&mut registry, "Container", 0);
        let id = registry
            .declare_class(
                ClassDecl::new("Tray")
                    .base("Container")
                    .field(FieldDecl::new("size", Annotation::named("int"))),
            )
            .unwrap();
        assert!(registry.class(id).unwrap().bound_default_names().is_empty());
    }

    #[test]
    fn bound_default_keeps_signature_shape() {
        let mut registry = Registry::new();
        registry
            .declare_interface(
                InterfaceDecl::new("Chain").method(
                    MethodDecl::new("next")
                        .param("step")
                        .returns(Annotation::named("Chain"))
                        .default_body(NativeFn::returning_self()),
                ),
            )
            .unwrap();
        let id = registry
            .declare_class(ClassDecl::new("Link").base("Chain"))
            .unwrap();

        let next = registry.names().name_id("next").unwrap();
        let chain = registry.names().name_id("Chain").unwrap();
        let bound = registry.class(id).unwrap().bound_default(next).unwrap();
        assert_eq!(bound.params.len(), 1);
        assert_eq!(bound.returns, TypeAnnotation::Named(chain));
    }

    #[test]
    fn structural_class_gets_no_defaults() {
        let mut registry = Registry::new();
        sized(&mut registry, "Container", 0);
        let id = registry.declare_class(ClassDecl::new("Loose")).unwrap();
        assert!(registry.class(id).unwrap().bound_default_names().is_empty());
    }
}
