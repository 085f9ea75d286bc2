// src/commands/check.rs

use std::io::{self, Write};
use std::process::ExitCode;

use super::common::{TermColors, load_file};
use crate::cli::expand_paths;
use crate::sema::{Conformance, Registry, TypeDefKind};

/// Declare every `.iface` file under `paths` into one registry and print
/// the conformance of each class against each interface.
pub fn check_files(paths: &[String]) -> ExitCode {
    let files = match expand_paths(paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if files.is_empty() {
        eprintln!("error: no .iface files found");
        return ExitCode::FAILURE;
    }

    let mut registry = Registry::new();
    let mut failed = false;
    for file in &files {
        tracing::debug!(file = %file.display(), "loading");
        failed |= load_file(&mut registry, file).is_err();
    }

    let colors = TermColors::auto();
    if let Err(e) = write_matrix(&registry, &mut io::stdout().lock(), &colors) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Every class against every interface, in declaration order.
pub fn write_matrix<W: Write>(
    registry: &Registry,
    out: &mut W,
    colors: &TermColors,
) -> io::Result<()> {
    let interfaces: Vec<_> = registry.type_ids(TypeDefKind::Interface).collect();
    for class in registry.type_ids(TypeDefKind::Class) {
        writeln!(out, "{}", registry.type_name(class))?;
        for &interface in &interfaces {
            let result = registry.conforms(class, interface);
            write_verdict(registry, &result, out, colors, "  ")?;
        }
    }
    Ok(())
}

/// One verdict line, followed by a line per failed signature.
pub fn write_verdict<W: Write>(
    registry: &Registry,
    result: &Conformance,
    out: &mut W,
    colors: &TermColors,
    indent: &str,
) -> io::Result<()> {
    let interface = registry.type_name(result.interface);
    if result.is_conforming() {
        writeln!(
            out,
            "{indent}{}conforms{} to {interface}",
            colors.green(),
            colors.reset()
        )?;
        return Ok(());
    }
    writeln!(
        out,
        "{indent}{}does not conform{} to {interface}",
        colors.red(),
        colors.reset()
    )?;
    for failure in &result.failures {
        writeln!(out, "{indent}  {}{}{}", colors.dim(), failure, colors.reset())?;
    }
    Ok(())
}
