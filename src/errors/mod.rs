// src/errors/mod.rs
//! Structured error reporting.
//!
//! Every phase has its own `thiserror` enum carrying `miette` diagnostic codes:
//! lexing (E0xxx), parsing (E1xxx), declaration (E2xxx) and calls (E3xxx).

pub mod declaration;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod runtime;

pub use declaration::DeclarationError;
pub use lexer::LexerError;
pub use parser::ParserError;
pub use report::{render_to_stderr, render_to_string, render_to_writer};
pub use runtime::RuntimeError;
