// src/commands/query.rs

use std::io;
use std::path::Path;
use std::process::ExitCode;

use super::check::write_verdict;
use super::common::{TermColors, load_file};
use crate::sema::Registry;

/// Print whether `class` conforms to `interface`. Succeeds only when it does.
pub fn query_file(path: &Path, class: &str, interface: &str) -> ExitCode {
    let mut registry = Registry::new();
    if load_file(&mut registry, path).is_err() {
        return ExitCode::FAILURE;
    }

    let (Some(class_id), Some(interface_id)) =
        (registry.type_by_name(class), registry.type_by_name(interface))
    else {
        let missing = if registry.type_by_name(class).is_none() {
            class
        } else {
            interface
        };
        eprintln!("error: '{}' is not declared in '{}'", missing, path.display());
        return ExitCode::FAILURE;
    };

    let result = registry.conforms(class_id, interface_id);
    let colors = TermColors::auto();
    let mut out = io::stdout().lock();
    if let Err(e) = write_verdict(&registry, &result, &mut out, &colors, &format!("{class} ")) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    if result.is_conforming() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
