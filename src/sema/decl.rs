// src/sema/decl.rs
//
// Declaration surface: what callers hand to the registry to declare an
// interface or a class. Names are plain strings here and are interned
// when the declaration is processed.

use crate::runtime::{NativeFn, Value};
use crate::sema::types::Decorator;

/// A type annotation as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    SelfType,
    Named(String),
}

impl Annotation {
    pub fn named(name: impl Into<String>) -> Self {
        Annotation::Named(name.into())
    }
}

#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub annotation: Option<Annotation>,
}

/// One method of an interface or class declaration.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub returns: Option<Annotation>,
    /// Outermost first.
    pub decorators: Vec<Decorator>,
    pub body: Option<NativeFn>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            decorators: Vec::new(),
            body: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            annotation: None,
        });
        self
    }

    pub fn typed_param(mut self, name: impl Into<String>, annotation: Annotation) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            annotation: Some(annotation),
        });
        self
    }

    pub fn returns(mut self, annotation: Annotation) -> Self {
        self.returns = Some(annotation);
        self
    }

    /// Apply a decorator inside the ones already applied.
    pub fn decorate(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Shorthand for the `default` decorator plus its body.
    pub fn default_body(self, body: NativeFn) -> Self {
        self.decorate(Decorator::Default).body(body)
    }

    pub fn body(mut self, body: NativeFn) -> Self {
        self.body = Some(body);
        self
    }

    pub(crate) fn is_marked_default(&self) -> bool {
        self.decorators.contains(&Decorator::Default)
    }
}

/// A typed data member. On an interface it is a requirement; on a class it
/// is declared state, optionally with the value new instances start with.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub annotation: Annotation,
    /// Ignored on interfaces.
    pub value: Option<Value>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            name: name.into(),
            annotation,
            value: None,
        }
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    /// Must stay empty; any entry is an invalid declaration.
    pub bases: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl InterfaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn base(mut self, name: impl Into<String>) -> Self {
        self.bases.push(name.into());
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    /// Classes or interfaces, in declaration order.
    pub bases: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn base(mut self, name: impl Into<String>) -> Self {
        self.bases.push(name.into());
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}
