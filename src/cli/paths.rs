// src/cli/paths.rs
//
// Expands command-line path arguments into `.iface` files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::glob;
use thiserror::Error;

pub const DECLARATION_EXTENSION: &str = "iface";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expand files, directories and glob patterns into `.iface` files.
///
/// Explicit files keep their argument order and come first. Directory and
/// glob matches follow in sorted order. Duplicates are dropped by canonical
/// path. An empty result is not an error.
pub fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>, PathError> {
    let mut explicit = Vec::new();
    let mut matched = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        let path = PathBuf::from(pattern);
        if path.is_file() {
            if is_declaration_file(&path) {
                add_unique(path, &mut explicit, &mut seen);
            }
        } else if path.is_dir() {
            let pattern = format!("{}/**/*.{}", pattern, DECLARATION_EXTENSION);
            expand_glob(&pattern, &mut matched, &mut seen)?;
        } else {
            expand_glob(pattern, &mut matched, &mut seen)?;
        }
    }

    explicit.extend(matched);
    Ok(explicit)
}

fn expand_glob(
    pattern: &str,
    files: &mut Vec<PathBuf>,
    seen: &mut HashSet<PathBuf>,
) -> Result<(), PathError> {
    let entries = glob(pattern).map_err(|e| PathError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    for entry in entries {
        let path = entry.map_err(|e| PathError::Io {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        if path.is_file() && is_declaration_file(&path) {
            add_unique(path, files, seen);
        }
    }
    Ok(())
}

fn add_unique(path: PathBuf, files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    let key = path.canonicalize().unwrap_or_else(|_| path.clone());
    if seen.insert(key) {
        files.push(path);
    }
}

fn is_declaration_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == DECLARATION_EXTENSION)
}
