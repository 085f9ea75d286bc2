// src/frontend/mod.rs
//! Lexer and parser for `.iface` declaration files.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Span, Token, TokenType};
