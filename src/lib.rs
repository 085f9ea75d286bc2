// src/lib.rs
pub mod cli;
pub mod commands;
pub mod errors;
pub mod frontend;
pub mod identity;
pub mod runtime;
pub mod sema;

pub use sema::{Conformance, Mismatch, MismatchReason, Registry};
