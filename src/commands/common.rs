// src/commands/common.rs
//! Shared utilities for CLI commands.

use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use miette::NamedSource;

use crate::errors::render_to_stderr;
use crate::frontend::Parser;
use crate::frontend::ast::Program;
use crate::sema::{LoweredProgram, Registry, lower_program};

/// Read, parse and declare one file into `registry`, rendering any
/// diagnostics to stderr.
///
/// Returns `Err(())` once diagnostics have been rendered.
pub fn load_file(registry: &mut Registry, path: &Path) -> Result<LoweredProgram, ()> {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {}", path.display(), e);
            return Err(());
        }
    };
    load_source(registry, &source, &path.to_string_lossy())
}

/// Parse and declare source text. `file_name` is used for diagnostics only.
pub fn load_source(
    registry: &mut Registry,
    source: &str,
    file_name: &str,
) -> Result<LoweredProgram, ()> {
    let program = parse_source(source, file_name)?;
    match lower_program(registry, &program) {
        Ok(lowered) => Ok(lowered),
        Err(e) => {
            eprintln!(
                "error in {}:{}:{}",
                file_name, e.span.line, e.span.column
            );
            render_to_stderr(&e.error);
            Err(())
        }
    }
}

fn parse_source(source: &str, file_name: &str) -> Result<Program, ()> {
    let named = || NamedSource::new(file_name, source.to_string());
    let mut parser = Parser::new(source);
    let result = parser.parse_program();

    // A lexer error explains the parse error it caused, so report it alone.
    let lexer_errors = parser.take_lexer_errors();
    if !lexer_errors.is_empty() {
        for error in lexer_errors {
            let report = miette::Report::new(error).with_source_code(named());
            render_to_stderr(report.as_ref());
        }
        return Err(());
    }

    result.map_err(|error| {
        let report = miette::Report::new(error).with_source_code(named());
        render_to_stderr(report.as_ref());
    })
}

/// Check if stdout supports color output.
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal()
}

/// ANSI color codes for terminal output.
pub struct TermColors {
    use_color: bool,
}

impl TermColors {
    /// Create a new TermColors that auto-detects stdout terminal support.
    pub fn auto() -> Self {
        Self {
            use_color: stdout_supports_color(),
        }
    }

    /// No escape codes at all.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Green text (for success).
    pub fn green(&self) -> &'static str {
        if self.use_color { "\x1b[32m" } else { "" }
    }

    /// Red text (for errors/failures).
    pub fn red(&self) -> &'static str {
        if self.use_color { "\x1b[31m" } else { "" }
    }

    /// Dim/gray text (for mismatch details).
    pub fn dim(&self) -> &'static str {
        if self.use_color { "\x1b[90m" } else { "" }
    }

    /// Reset to default colors.
    pub fn reset(&self) -> &'static str {
        if self.use_color { "\x1b[0m" } else { "" }
    }
}
