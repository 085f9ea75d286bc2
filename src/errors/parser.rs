// src/errors/parser.rs
//! Parser errors (E1xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParserError {
    #[error("expected '{expected}', found '{found}'")]
    #[diagnostic(code(E1001))]
    ExpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token")]
        span: SourceSpan,
    },

    #[error("expected declaration, found '{found}'")]
    #[diagnostic(
        code(E1002),
        help("a file contains only 'interface' and 'class' declarations")
    )]
    ExpectedDeclaration {
        found: String,
        #[label("expected 'interface' or 'class'")]
        span: SourceSpan,
    },

    #[error("expected identifier, found '{found}'")]
    #[diagnostic(code(E1003))]
    ExpectedIdentifier {
        found: String,
        #[label("expected identifier")]
        span: SourceSpan,
    },

    #[error("expected type annotation")]
    #[diagnostic(code(E1004), help("use a type name or 'Self'"))]
    ExpectedType {
        #[label("expected type")]
        span: SourceSpan,
    },

    #[error("interface method '{method}' needs a return type")]
    #[diagnostic(code(E1005), help("add '-> Type' after the parameter list"))]
    MissingReturnType {
        method: String,
        #[label("no return type")]
        span: SourceSpan,
    },

    #[error("expected method body, found '{found}'")]
    #[diagnostic(
        code(E1006),
        help("bodies are constants: a number, string, true, false, nil or self")
    )]
    ExpectedBody {
        found: String,
        #[label("expected constant")]
        span: SourceSpan,
    },

    #[error("expected field value, found '{found}'")]
    #[diagnostic(
        code(E1008),
        help("field values are constants: a number, string, true, false or nil")
    )]
    ExpectedValue {
        found: String,
        #[label("expected constant")]
        span: SourceSpan,
    },

    #[error("lexer error")]
    #[diagnostic(code(E1007))]
    LexerFailure {
        #[label("invalid token")]
        span: SourceSpan,
    },
}
