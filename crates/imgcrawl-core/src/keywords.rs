//! Keyword list: load, normalize, persist.
//!
//! The list file holds one keyword per line. After every load it is rewritten
//! in canonical form (trimmed, deduplicated, sorted, no BOM) so repeated runs
//! see the same order.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Error)]
pub enum KeywordError {
    /// The list could not be read; the crawl cannot proceed.
    #[error("failed to read keyword list {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    /// The canonical list could not be written back.
    #[error("failed to write keyword list {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Parses raw file content into the canonical keyword list.
pub fn parse(raw: &[u8]) -> Vec<String> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let text = String::from_utf8_lossy(raw);
    let set: BTreeSet<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    set.into_iter().collect()
}

/// Reads the keyword list at `path`: BOM stripped, lines trimmed, empties
/// dropped, deduplicated and sorted ascending.
pub fn load(path: &Path) -> Result<Vec<String>, KeywordError> {
    let raw = std::fs::read(path).map_err(|source| KeywordError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&raw))
}

/// Replaces the file at `path` with `keywords`, one per line.
///
/// Writes a temp file next to the target and renames it over, so a crash
/// leaves either the old or the new list.
pub fn persist(path: &Path, keywords: &[String]) -> Result<(), KeywordError> {
    let write_err = |source: io::Error| KeywordError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut w = io::BufWriter::new(tmp.as_file_mut());
        for keyword in keywords {
            writeln!(w, "{}", keyword).map_err(write_err)?;
        }
        w.flush().map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Loads the list and unconditionally writes it back in canonical form.
pub fn load_and_normalize(path: &Path) -> Result<Vec<String>, KeywordError> {
    let keywords = load(path)?;
    tracing::info!("{} keywords found: {:?}", keywords.len(), keywords);
    persist(path, &keywords)?;
    Ok(keywords)
}
