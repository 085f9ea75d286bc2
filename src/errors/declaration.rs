// src/errors/declaration.rs
//! Declaration errors (E2xxx).
//!
//! Raised while an interface or class is being declared. Nothing is
//! registered when one of these is returned.

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("interface '{interface}' cannot derive from '{base}'")]
    #[diagnostic(
        code(E2001),
        help("interfaces may only derive from the root object type")
    )]
    InvalidInterfaceBase { interface: String, base: String },

    #[error("type '{name}' is already declared")]
    #[diagnostic(code(E2002))]
    DuplicateType { name: String },

    #[error("method '{method}' is declared twice in '{type_name}'")]
    #[diagnostic(code(E2003))]
    DuplicateMethod { type_name: String, method: String },

    #[error("class '{class}' derives from unknown type '{base}'")]
    #[diagnostic(code(E2004), help("declare '{base}' before '{class}'"))]
    UnknownBase { class: String, base: String },

    #[error("'@default' on '{interface}.{method}' is beneath '@{outer}'")]
    #[diagnostic(
        code(E2005),
        help("'@default' must be the outermost decorator of a method")
    )]
    DefaultNotOutermost {
        interface: String,
        method: String,
        outer: String,
    },

    #[error("default method '{interface}.{method}' has no body")]
    #[diagnostic(code(E2006))]
    MissingDefaultBody { interface: String, method: String },

    #[error("type '{name}' lists '{base}' as a base more than once")]
    #[diagnostic(code(E2007))]
    DuplicateBase { name: String, base: String },

    #[error("interface method '{interface}.{method}' has no return type")]
    #[diagnostic(code(E2008), help("annotate the return type, or use 'Self'"))]
    MissingReturnType { interface: String, method: String },

    #[error("field '{field}' clashes with another member of '{type_name}'")]
    #[diagnostic(code(E2009), help("fields and methods share one namespace"))]
    DuplicateField { type_name: String, field: String },
}
