// src/sema/lower.rs
//
// Turns a parsed `.iface` program into registry declarations, in source
// order. Forward references inside signatures are fine; bases must be
// declared earlier in the file (or in an earlier file).

use crate::errors::DeclarationError;
use crate::frontend::Span;
use crate::frontend::ast::{DeclKind, FieldSig, Literal, MethodSig, Program, TypeDecl, TypeExpr};
use crate::identity::TypeDefId;
use crate::runtime::{NativeFn, Value};
use crate::sema::Registry;
use crate::sema::decl::{Annotation, ClassDecl, FieldDecl, InterfaceDecl, MethodDecl};
use crate::sema::types::{Decorator, TypeDefKind};

/// Ids declared by one program, in source order.
#[derive(Debug, Clone, Default)]
pub struct LoweredProgram {
    pub declared: Vec<(TypeDefId, TypeDefKind)>,
}

impl LoweredProgram {
    pub fn interfaces(&self) -> impl Iterator<Item = TypeDefId> + '_ {
        self.of_kind(TypeDefKind::Interface)
    }

    pub fn classes(&self) -> impl Iterator<Item = TypeDefId> + '_ {
        self.of_kind(TypeDefKind::Class)
    }

    fn of_kind(&self, kind: TypeDefKind) -> impl Iterator<Item = TypeDefId> + '_ {
        self.declared
            .iter()
            .filter(move |(_, k)| *k == kind)
            .map(|(id, _)| *id)
    }
}

/// A declaration error located at the declaration that raised it.
#[derive(Debug, Clone)]
pub struct LowerError {
    pub error: DeclarationError,
    pub span: Span,
}

/// Declare every type of `program`. Stops at the first failing declaration;
/// everything before it stays declared.
pub fn lower_program(
    registry: &mut Registry,
    program: &Program,
) -> Result<LoweredProgram, LowerError> {
    let mut lowered = LoweredProgram::default();
    for decl in &program.decls {
        let result = match decl.kind {
            DeclKind::Interface => registry
                .declare_interface(lower_interface(decl))
                .map(|id| (id, TypeDefKind::Interface)),
            DeclKind::Class => registry
                .declare_class(lower_class(decl))
                .map(|id| (id, TypeDefKind::Class)),
        };
        let entry = result.map_err(|error| LowerError {
            error,
            span: decl.name.span,
        })?;
        lowered.declared.push(entry);
    }
    tracing::debug!(types = lowered.declared.len(), "lowered program");
    Ok(lowered)
}

fn lower_interface(decl: &TypeDecl) -> InterfaceDecl {
    let mut out = InterfaceDecl::new(decl.name.name.as_str());
    for base in &decl.bases {
        out = out.base(base.name.as_str());
    }
    for field in &decl.fields {
        out = out.field(lower_field(field));
    }
    decl.methods
        .iter()
        .fold(out, |out, method| out.method(lower_method(method)))
}

fn lower_class(decl: &TypeDecl) -> ClassDecl {
    let mut out = ClassDecl::new(decl.name.name.as_str());
    for base in &decl.bases {
        out = out.base(base.name.as_str());
    }
    for field in &decl.fields {
        out = out.field(lower_field(field));
    }
    decl.methods
        .iter()
        .fold(out, |out, method| out.method(lower_method(method)))
}

fn lower_field(sig: &FieldSig) -> FieldDecl {
    let field = FieldDecl::new(sig.name.name.as_str(), lower_type(&sig.ty));
    match sig.value.as_ref().and_then(lower_value) {
        Some(value) => field.value(value),
        None => field,
    }
}

fn lower_method(sig: &MethodSig) -> MethodDecl {
    let mut method = MethodDecl::new(sig.name.name.as_str());
    for decorator in &sig.decorators {
        method = method.decorate(Decorator::from_name(&decorator.name));
    }
    for param in &sig.params {
        method = match &param.ty {
            Some(ty) => method.typed_param(param.name.name.as_str(), lower_type(ty)),
            None => method.param(param.name.name.as_str()),
        };
    }
    if let Some(returns) = &sig.returns {
        method = method.returns(lower_type(returns));
    }
    if let Some(body) = &sig.body {
        method = method.body(lower_body(body));
    }
    method
}

fn lower_type(ty: &TypeExpr) -> Annotation {
    match ty {
        TypeExpr::SelfType(_) => Annotation::SelfType,
        TypeExpr::Named(ident) => Annotation::named(ident.name.as_str()),
    }
}

fn lower_body(literal: &Literal) -> NativeFn {
    match lower_value(literal) {
        Some(value) => NativeFn::constant(value),
        None => NativeFn::returning_self(),
    }
}

/// `None` for `self`, which has no value outside a call.
fn lower_value(literal: &Literal) -> Option<Value> {
    match literal {
        Literal::Int(n) => Some(Value::Int(*n)),
        Literal::Float(f) => Some(Value::Float(*f)),
        Literal::Str(s) => Some(Value::str(s)),
        Literal::Bool(b) => Some(Value::Bool(*b)),
        Literal::Nil => Some(Value::Nil),
        Literal::SelfRef => None,
    }
}
