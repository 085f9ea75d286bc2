// src/frontend/ast.rs

use crate::frontend::Span;

/// A parsed `.iface` file
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub decls: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Interface,
    Class,
}

/// `interface Name { ... }` or `class Name: Base { ... }`
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub kind: DeclKind,
    pub name: Ident,
    pub bases: Vec<Ident>,
    pub fields: Vec<FieldSig>,
    pub methods: Vec<MethodSig>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// `name: Type` or `name: Type = value`
#[derive(Debug, Clone)]
pub struct FieldSig {
    pub name: Ident,
    pub ty: TypeExpr,
    /// Never `Literal::SelfRef`.
    pub value: Option<Literal>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodSig {
    /// Outermost first, as written.
    pub decorators: Vec<Ident>,
    pub name: Ident,
    pub params: Vec<ParamSig>,
    pub returns: Option<TypeExpr>,
    pub body: Option<Literal>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParamSig {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    SelfType(Span),
    Named(Ident),
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::SelfType(span) => *span,
            TypeExpr::Named(ident) => ident.span,
        }
    }
}

/// Constant method body or field value: `= 0`, `= "x"`, `= self`
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
    SelfRef,
}
