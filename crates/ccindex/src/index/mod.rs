//! The symbol extraction engine and its entry point.

pub mod classify;
pub mod hierarchy;
pub mod typedesc;

mod assemble;
mod comment;
mod prototype;
mod tokens;

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Config, ConfigError, DEFAULT_LINE_WIDTH};
use crate::frontend::{self, IncludeEntry, TranslationUnit};
use crate::symbol::Symbol;

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct IndexResult {
    /// Extracted symbols in traversal order.
    pub symbols: Vec<Symbol>,
    /// Include-graph entries restricted to the target file and the
    /// user-supplied include directories.
    pub includes: Vec<IncludeEntry>,
    /// Front-end diagnostics, verbatim. A non-empty list does not abort the
    /// run; a partially resolved AST still yields degraded symbol data.
    pub diagnostics: Vec<String>,
    pub parse_seconds: f64,
    pub traverse_seconds: f64,
}

#[derive(Debug)]
pub enum IndexError {
    /// The target file does not exist; reported before the front end runs.
    MissingFile(PathBuf),
    Config(ConfigError),
    /// The front-end library failed to load or the parse produced no
    /// translation unit at all.
    Frontend(String),
    /// An internal consistency assumption was violated. Never masked: it
    /// means the engine's own classification was wrong.
    Internal(String),
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile(path) => write!(f, "source file not found: {}", path.display()),
            Self::Config(error) => write!(f, "{error}"),
            Self::Frontend(reason) => write!(f, "front end failed: {reason}"),
            Self::Internal(reason) => write!(f, "internal consistency failure: {reason}"),
        }
    }
}

impl std::error::Error for IndexError {}

impl From<ConfigError> for IndexError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

/// Parse `target` and extract its symbols.
///
/// Configuration problems and a missing input file fail before any parse
/// attempt; parse diagnostics are collected, not fatal.
pub fn index_file(config: &Config, target: &Path) -> Result<IndexResult, IndexError> {
    if !target.is_file() {
        return Err(IndexError::MissingFile(target.to_path_buf()));
    }
    config.validate()?;

    info!("indexing {}", target.display());
    let parse_start = Instant::now();
    let tu = frontend::clang::parse(config, target).map_err(|error| match error {
        frontend::clang::ParseError::LibraryLoad(reason) => {
            IndexError::Config(ConfigError::FrontendLibrary(reason))
        }
        other => IndexError::Frontend(other.to_string()),
    })?;
    let parse_seconds = parse_start.elapsed().as_secs_f64();
    debug!(
        "parsed {} ({} diagnostics, {} cursors)",
        target.display(),
        tu.diagnostics.len(),
        tu.cursors.len()
    );

    let traverse_start = Instant::now();
    let symbols = extract_symbols_with(&tu, config.line_width)?;
    let traverse_seconds = traverse_start.elapsed().as_secs_f64();
    info!("extracted {} symbols from {}", symbols.len(), tu.target_file);

    let includes = filter_includes(&tu, &config.include_dirs);
    Ok(IndexResult {
        symbols,
        includes,
        diagnostics: tu.diagnostics,
        parse_seconds,
        traverse_seconds,
    })
}

/// Run the traversal over an existing snapshot with the default wrap width.
pub fn extract_symbols(tu: &TranslationUnit) -> Result<Vec<Symbol>, IndexError> {
    extract_symbols_with(tu, DEFAULT_LINE_WIDTH)
}

/// One pre-order walk over the snapshot, restricted to the target file.
/// Ids are assigned sequentially in traversal order, so identical input
/// yields identical output.
pub fn extract_symbols_with(
    tu: &TranslationUnit,
    line_width: usize,
) -> Result<Vec<Symbol>, IndexError> {
    let mut symbols = Vec::new();
    let mut next_id = 1u32;
    for cursor in tu.root().walk_preorder() {
        if cursor.location().file != tu.target_file {
            continue;
        }
        if !classify::is_interesting(cursor.kind()) {
            continue;
        }
        if cursor.spelling().is_empty() {
            // Anonymous declarations never become records of their own.
            continue;
        }
        symbols.push(assemble::assemble(cursor, next_id, line_width)?);
        next_id += 1;
    }
    Ok(symbols)
}

fn filter_includes(tu: &TranslationUnit, user_dirs: &[PathBuf]) -> Vec<IncludeEntry> {
    tu.includes
        .iter()
        .filter(|entry| {
            entry.included_at.file == tu.target_file
                || user_dirs.iter().any(|dir| Path::new(&entry.file).starts_with(dir))
        })
        .cloned()
        .collect()
}
