// src/errors/runtime.rs
//! Instantiation and call errors (E3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("cannot instantiate interface '{name}'")]
    #[diagnostic(code(E3001), help("declare a class that implements '{name}'"))]
    InstantiateInterface { name: String },

    #[error("unknown type '{name}'")]
    #[diagnostic(code(E3002))]
    UnknownType { name: String },

    #[error("'{type_name}' has no method '{method}'")]
    #[diagnostic(code(E3003))]
    NoSuchMethod { type_name: String, method: String },

    #[error("'{method}' expects {expected} arguments, found {found}")]
    #[diagnostic(code(E3004))]
    WrongArgumentCount {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("{message}")]
    #[diagnostic(code(E3005))]
    Raised { message: String },
}

impl RuntimeError {
    /// Error raised from inside a method body.
    pub fn raised(message: impl Into<String>) -> Self {
        RuntimeError::Raised {
            message: message.into(),
        }
    }
}
