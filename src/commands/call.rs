// src/commands/call.rs

use std::path::Path;
use std::process::ExitCode;

use super::common::load_file;
use crate::errors::{RuntimeError, render_to_stderr};
use crate::runtime::Value;
use crate::sema::Registry;

/// Instantiate `class` and call `method` on it with no arguments.
pub fn call_method(path: &Path, class: &str, method: &str) -> ExitCode {
    let mut registry = Registry::new();
    if load_file(&mut registry, path).is_err() {
        return ExitCode::FAILURE;
    }
    match invoke(&registry, class, method) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            render_to_stderr(&e);
            ExitCode::FAILURE
        }
    }
}

pub fn invoke(registry: &Registry, class: &str, method: &str) -> Result<Value, RuntimeError> {
    let id = registry
        .type_by_name(class)
        .ok_or_else(|| RuntimeError::UnknownType {
            name: class.to_string(),
        })?;
    let instance = registry.instantiate(id)?;
    registry.call(&instance, method, &[])
}
