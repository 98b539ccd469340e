//! Completion marker: an empty `{site}_done` file in the keyword directory.
//!
//! Written once every link of a keyword has been attempted, whatever the
//! number of images that actually made it to disk.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use crate::layout;

/// Creates the marker for `site_name` in `keyword_dir`. Idempotent: an
/// existing marker is left untouched.
pub fn mark(keyword_dir: &Path, site_name: &str) -> io::Result<PathBuf> {
    let path = keyword_dir.join(layout::marker_name(site_name));
    OpenOptions::new().create(true).append(true).open(&path)?;
    Ok(path)
}

/// True if the keyword's pass for `site_name` finished.
pub fn is_marked(keyword_dir: &Path, site_name: &str) -> bool {
    keyword_dir.join(layout::marker_name(site_name)).is_file()
}
