//! Per-keyword progress read back from the download tree.

use std::path::Path;

use crate::layout;
use crate::marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordState {
    /// No directory yet; the next run will pick it up.
    Pending,
    /// Directory exists but no completion marker (interrupted or provider failed).
    Partial,
    /// Completion marker present.
    Done,
}

impl KeywordState {
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordState::Pending => "pending",
            KeywordState::Partial => "partial",
            KeywordState::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordStatus {
    pub keyword: String,
    pub state: KeywordState,
    pub images: usize,
}

/// Status of each keyword under `download_dir` for `site_name`.
pub fn keyword_status(keywords: &[String], download_dir: &Path, site_name: &str) -> Vec<KeywordStatus> {
    keywords
        .iter()
        .map(|keyword| {
            let dir = layout::keyword_dir(download_dir, keyword);
            let state = if !dir.is_dir() {
                KeywordState::Pending
            } else if marker::is_marked(&dir, site_name) {
                KeywordState::Done
            } else {
                KeywordState::Partial
            };
            KeywordStatus {
                keyword: keyword.clone(),
                state,
                images: count_images(&dir, site_name),
            }
        })
        .collect()
}

fn count_images(dir: &Path, site_name: &str) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| layout::is_image_name(name, site_name))
                .unwrap_or(false)
        })
        .count()
}
