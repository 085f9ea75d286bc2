// src/sema/types.rs
//
// Annotations, parameters and return-type classifiers shared by the
// interface and class tables.

use std::fmt;

use smallvec::SmallVec;

use crate::identity::{NameId, NameTable, TypeDefId};

/// A declared return or parameter annotation.
///
/// `SelfType` is the sentinel for "exactly the receiver's runtime type" and is
/// never equal to any named type, including the name of the receiver's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeAnnotation {
    SelfType,
    Named(NameId),
}

impl TypeAnnotation {
    pub fn display(&self, names: &NameTable) -> String {
        match self {
            TypeAnnotation::SelfType => "Self".to_string(),
            TypeAnnotation::Named(name) => names.resolve(*name).to_string(),
        }
    }
}

/// How an interface signature constrains the implementer's return annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    /// Implementer must annotate `Self`.
    SelfType,
    /// Implementer must name the interface or a class that conforms to it.
    InterfaceType(TypeDefId),
    /// Implementer must name exactly this type.
    Concrete(NameId),
}

/// A method parameter. The receiver is implicit and never listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: NameId,
    /// Advisory only; conformance compares names and arity.
    pub annotation: Option<TypeAnnotation>,
}

/// Most methods take a handful of parameters.
pub type Params = SmallVec<[Param; 4]>;

/// Render a parameter list as `(a, b: int)`.
pub fn display_params(params: &[Param], names: &NameTable) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|p| match p.annotation {
            Some(ann) => format!("{}: {}", names.resolve(p.name), ann.display(names)),
            None => names.resolve(p.name).to_string(),
        })
        .collect();
    format!("({})", rendered.join(", "))
}

/// A method-modifying decorator, listed outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decorator {
    /// Marks an interface method as carrying a default implementation.
    Default,
    Named(String),
}

impl Decorator {
    pub fn from_name(name: &str) -> Self {
        if name == "default" {
            Decorator::Default
        } else {
            Decorator::Named(name.to_string())
        }
    }
}

impl fmt::Display for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decorator::Default => write!(f, "default"),
            Decorator::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Class,
    Interface,
}
