// tests/conformance.rs
//
// End-to-end behavior of the public registry API.

use conform::errors::DeclarationError;
use conform::runtime::{NativeFn, Value};
use conform::sema::{Annotation, ClassDecl, FieldDecl, InterfaceDecl, MethodDecl, ReturnKind};
use conform::{MismatchReason, Registry};

fn typed(name: &str, ret: Annotation) -> MethodDecl {
    MethodDecl::new(name)
        .typed_param("a", Annotation::named("int"))
        .returns(ret)
}

/// `foo -> TestInterface`, `bar -> Self`, and a default `baz -> Self`.
fn test_interface(registry: &mut Registry) {
    registry
        .declare_interface(
            InterfaceDecl::new("TestInterface")
                .method(typed("foo", Annotation::named("TestInterface")))
                .method(typed("bar", Annotation::SelfType))
                .method(
                    typed("baz", Annotation::SelfType).default_body(NativeFn::returning_self()),
                ),
        )
        .unwrap();
}

#[test]
fn self_type_and_interface_type_semantics() {
    let mut registry = Registry::new();
    test_interface(&mut registry);

    // Nominal inheritor returning the interface type; default inherited.
    registry
        .declare_class(
            ClassDecl::new("TestA")
                .base("TestInterface")
                .method(typed("foo", Annotation::named("TestInterface")))
                .method(typed("bar", Annotation::SelfType)),
        )
        .unwrap();
    // Returns its own class name where the interface type is required.
    registry
        .declare_class(
            ClassDecl::new("TestB")
                .base("TestInterface")
                .method(typed("foo", Annotation::named("TestB")))
                .method(typed("bar", Annotation::SelfType)),
        )
        .unwrap();
    // Overrides the default.
    registry
        .declare_class(
            ClassDecl::new("TestD")
                .base("TestInterface")
                .method(typed("foo", Annotation::named("TestInterface")))
                .method(typed("bar", Annotation::SelfType))
                .method(typed("baz", Annotation::SelfType)),
        )
        .unwrap();
    // Purely structural, implements the default itself.
    registry
        .declare_class(
            ClassDecl::new("TestE")
                .method(typed("foo", Annotation::named("TestInterface")))
                .method(typed("bar", Annotation::SelfType))
                .method(typed("baz", Annotation::SelfType)),
        )
        .unwrap();
    // Purely structural, relies on the default it cannot inherit.
    registry
        .declare_class(
            ClassDecl::new("TestF")
                .method(typed("foo", Annotation::named("TestInterface")))
                .method(typed("bar", Annotation::SelfType)),
        )
        .unwrap();

    assert!(registry.is_subclass_by_name("TestA", "TestInterface"));
    assert!(!registry.is_subclass_by_name("TestB", "TestInterface"));
    assert!(registry.is_subclass_by_name("TestD", "TestInterface"));
    assert!(registry.is_subclass_by_name("TestE", "TestInterface"));
    assert!(!registry.is_subclass_by_name("TestF", "TestInterface"));

    let iface = registry.type_by_name("TestInterface").unwrap();
    let test_b = registry.type_by_name("TestB").unwrap();
    let result = registry.conforms(test_b, iface);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].method, "foo");

    let test_f = registry.type_by_name("TestF").unwrap();
    let result = registry.conforms(test_f, iface);
    assert_eq!(result.failure("baz").unwrap().reason, MismatchReason::Missing);
}

#[test]
fn sibling_implementer_satisfies_interface_type() {
    let mut registry = Registry::new();
    registry
        .declare_interface(
            InterfaceDecl::new("Node").method(MethodDecl::new("next").returns(Annotation::named("Node"))),
        )
        .unwrap();
    let node = registry.type_by_name("Node").unwrap();
    let signature = registry
        .interface(node)
        .unwrap()
        .signature(registry.names().name_id("next").unwrap())
        .unwrap();
    assert_eq!(signature.return_kind, ReturnKind::InterfaceType(node));

    // Leaf returns the interface itself; Branch returns a Leaf.
    registry
        .declare_class(ClassDecl::new("Leaf").method(MethodDecl::new("next").returns(Annotation::named("Node"))))
        .unwrap();
    registry
        .declare_class(ClassDecl::new("Branch").method(MethodDecl::new("next").returns(Annotation::named("Leaf"))))
        .unwrap();
    // Returns a class that does not conform.
    registry
        .declare_class(ClassDecl::new("Stray").method(MethodDecl::new("next").returns(Annotation::named("int"))))
        .unwrap();
    registry
        .declare_class(ClassDecl::new("Lost").method(MethodDecl::new("next").returns(Annotation::named("Stray"))))
        .unwrap();

    assert!(registry.is_subclass_by_name("Leaf", "Node"));
    assert!(registry.is_subclass_by_name("Branch", "Node"));
    assert!(!registry.is_subclass_by_name("Stray", "Node"));
    assert!(!registry.is_subclass_by_name("Lost", "Node"));
}

#[test]
fn mutual_references_terminate() {
    let mut registry = Registry::new();
    registry
        .declare_interface(
            InterfaceDecl::new("Peer").method(MethodDecl::new("other").returns(Annotation::named("Peer"))),
        )
        .unwrap();
    // Ping and Pong only name each other, so neither is grounded.
    registry
        .declare_class(ClassDecl::new("Ping").method(MethodDecl::new("other").returns(Annotation::named("Pong"))))
        .unwrap();
    registry
        .declare_class(ClassDecl::new("Pong").method(MethodDecl::new("other").returns(Annotation::named("Ping"))))
        .unwrap();

    assert!(!registry.is_subclass_by_name("Ping", "Peer"));
    assert!(!registry.is_subclass_by_name("Pong", "Peer"));
}

#[test]
fn forward_references_resolve_after_declaration() {
    let mut registry = Registry::new();
    registry
        .declare_interface(
            InterfaceDecl::new("Factory")
                .method(MethodDecl::new("make").returns(Annotation::named("Widget"))),
        )
        .unwrap();
    registry
        .declare_class(
            ClassDecl::new("WidgetFactory")
                .method(MethodDecl::new("make").returns(Annotation::named("Widget"))),
        )
        .unwrap();
    // Concrete names compare by name, declared or not.
    assert!(registry.is_subclass_by_name("WidgetFactory", "Factory"));
    registry.declare_class(ClassDecl::new("Widget")).unwrap();
    assert!(registry.is_subclass_by_name("WidgetFactory", "Factory"));
}

#[test]
fn container_default_is_callable_and_overridable() {
    let mut registry = Registry::new();
    registry
        .declare_interface(
            InterfaceDecl::new("Container").method(
                MethodDecl::new("size")
                    .returns(Annotation::named("int"))
                    .default_body(NativeFn::constant(Value::Int(0))),
            ),
        )
        .unwrap();
    let boxed = registry
        .declare_class(ClassDecl::new("Box").base("Container"))
        .unwrap();
    let full = registry
        .declare_class(
            ClassDecl::new("Full").base("Container").method(
                MethodDecl::new("size")
                    .returns(Annotation::named("int"))
                    .body(NativeFn::constant(Value::Int(7))),
            ),
        )
        .unwrap();

    let instance = registry.instantiate(boxed).unwrap();
    assert_eq!(registry.call(&instance, "size", &[]), Ok(Value::Int(0)));
    let instance = registry.instantiate(full).unwrap();
    assert_eq!(registry.call(&instance, "size", &[]), Ok(Value::Int(7)));
    assert!(registry.is_subclass_by_name("Box", "Container"));
}

#[test]
fn membership_is_structural_only_for_subclass_queries() {
    let mut registry = Registry::new();
    let named = registry
        .declare_interface(
            InterfaceDecl::new("Named").method(MethodDecl::new("name").returns(Annotation::named("str"))),
        )
        .unwrap();
    let person = registry
        .declare_class(ClassDecl::new("Person").method(MethodDecl::new("name").returns(Annotation::named("str"))))
        .unwrap();

    let value = Value::Instance(registry.instantiate(person).unwrap());
    assert!(registry.is_subclass(person, named));
    assert!(!registry.is_instance(&value, named));
    assert!(registry.is_instance(&value, person));
    assert!(!registry.bases(person, named));
    assert!(!registry.is_instance(&Value::Int(1), person));
}

#[test]
fn invalid_interfaces_are_never_registered() {
    let mut registry = Registry::new();
    registry
        .declare_interface(
            InterfaceDecl::new("Shape").method(MethodDecl::new("area").returns(Annotation::named("float"))),
        )
        .unwrap();
    registry.declare_class(ClassDecl::new("Circle")).unwrap();

    for base in ["Shape", "Circle", "Unknown"] {
        let result = registry.declare_interface(InterfaceDecl::new("Solid").base(base));
        assert_eq!(
            result,
            Err(DeclarationError::InvalidInterfaceBase {
                interface: "Solid".to_string(),
                base: base.to_string(),
            })
        );
        assert!(registry.type_by_name("Solid").is_none());
    }
}

/// `size() -> ret`, defaulting to `value` when one is given.
fn sized(registry: &mut Registry, name: &str, ret: &str, value: Option<i64>) {
    let size = MethodDecl::new("size").returns(Annotation::named(ret));
    let size = match value {
        Some(n) => size.default_body(NativeFn::constant(Value::Int(n))),
        None => size,
    };
    registry
        .declare_interface(InterfaceDecl::new(name).method(size))
        .unwrap();
}

#[test]
fn default_bound_from_one_interface_satisfies_another() {
    let mut registry = Registry::new();
    sized(&mut registry, "Sized", "int", Some(0));
    sized(&mut registry, "HasSize", "int", None);
    sized(&mut registry, "Measured", "float", None);
    let boxed = registry
        .declare_class(ClassDecl::new("Box").base("Sized"))
        .unwrap();
    let loose = registry.declare_class(ClassDecl::new("Loose")).unwrap();

    let has_size = registry.type_by_name("HasSize").unwrap();
    let measured = registry.type_by_name("Measured").unwrap();
    let sized_id = registry.type_by_name("Sized").unwrap();

    let instance = registry.instantiate(boxed).unwrap();
    assert_eq!(registry.call(&instance, "size", &[]), Ok(Value::Int(0)));
    assert!(registry.is_subclass(boxed, has_size));
    assert!(registry.is_subclass(boxed, sized_id));
    assert_eq!(
        registry.conforms(boxed, measured).failure("size").unwrap().reason,
        MismatchReason::ReturnType {
            expected: "float".to_string(),
            found: "int".to_string(),
        }
    );
    // Only nominal inheritors receive the default.
    assert!(!registry.is_subclass(loose, sized_id));
}

#[test]
fn default_reached_through_class_base_satisfies_another_interface() {
    let mut registry = Registry::new();
    sized(&mut registry, "Small", "int", Some(1));
    sized(&mut registry, "Large", "int", Some(100));
    sized(&mut registry, "HasSize", "int", None);
    registry
        .declare_class(ClassDecl::new("Base").base("Small"))
        .unwrap();
    let sub = registry
        .declare_class(ClassDecl::new("Sub").base("Base").base("Large"))
        .unwrap();

    let instance = registry.instantiate(sub).unwrap();
    assert_eq!(registry.call(&instance, "size", &[]), Ok(Value::Int(1)));
    assert!(registry.is_subclass_by_name("Sub", "Large"));
    assert!(registry.is_subclass_by_name("Sub", "HasSize"));
}

#[test]
fn same_method_name_resolves_independently_per_interface() {
    let mut registry = Registry::new();
    let returns_int = MethodDecl::new("f").returns(Annotation::named("int"));
    let i = registry
        .declare_interface(InterfaceDecl::new("I").method(returns_int.clone()))
        .unwrap();
    let j = registry
        .declare_interface(
            InterfaceDecl::new("J").method(MethodDecl::new("f").returns(Annotation::SelfType)),
        )
        .unwrap();
    let c = registry
        .declare_class(ClassDecl::new("C").method(returns_int))
        .unwrap();

    assert!(registry.is_subclass(c, i));
    assert!(!registry.is_subclass(c, j));
    assert_eq!(
        registry.conforms(c, j).failure("f").unwrap().reason,
        MismatchReason::ReturnType {
            expected: "Self".to_string(),
            found: "int".to_string(),
        }
    );
    // Asking in the other order gives the same answers.
    assert!(!registry.conforms(c, j).is_conforming());
    assert!(registry.conforms(c, i).is_conforming());
}

#[test]
fn field_requirements_are_structural() {
    let mut registry = Registry::new();
    let named = registry
        .declare_interface(
            InterfaceDecl::new("Named")
                .field(FieldDecl::new("name", Annotation::named("str")))
                .method(MethodDecl::new("greet").returns(Annotation::named("str"))),
        )
        .unwrap();
    let person = registry
        .declare_class(
            ClassDecl::new("Person")
                .field(FieldDecl::new("name", Annotation::named("str")).value(Value::str("anon")))
                .method(MethodDecl::new("greet").returns(Annotation::named("str"))),
        )
        .unwrap();
    let robot = registry
        .declare_class(
            ClassDecl::new("Robot")
                .base("Named")
                .method(MethodDecl::new("greet").returns(Annotation::named("str"))),
        )
        .unwrap();

    assert!(registry.is_subclass(person, named));
    // Declaring the interface as a base does not supply its fields.
    let result = registry.conforms(robot, named);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failure("name").unwrap().reason, MismatchReason::Missing);

    let instance = registry.instantiate(person).unwrap();
    assert_eq!(instance.field("name"), Some(&Value::str("anon")));
}
